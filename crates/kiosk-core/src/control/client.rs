use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::control::command::ControlCommand;
use crate::control::errors::ControlError;

/// Deliver one command to a running controller.
///
/// Blocking; the controller sends nothing back, so success only means the
/// bytes were written and the stream closed.
pub fn send_command(
    addr: &str,
    command: &ControlCommand,
    timeout: Duration,
) -> Result<(), ControlError> {
    let socket_addr = addr
        .to_socket_addrs()
        .map_err(|_| ControlError::AddressUnresolved {
            addr: addr.to_string(),
        })?
        .next()
        .ok_or_else(|| ControlError::AddressUnresolved {
            addr: addr.to_string(),
        })?;

    let mut stream = TcpStream::connect_timeout(&socket_addr, timeout).map_err(|source| {
        ControlError::ConnectFailed {
            addr: addr.to_string(),
            source,
        }
    })?;

    let send_failed = |source: std::io::Error| ControlError::SendFailed {
        addr: addr.to_string(),
        source,
    };

    stream.set_write_timeout(Some(timeout)).map_err(send_failed)?;
    stream
        .write_all(command.to_wire().as_bytes())
        .map_err(send_failed)?;
    stream.flush().map_err(send_failed)?;
    stream.shutdown(Shutdown::Write).map_err(send_failed)?;

    debug!(
        event = "core.control.command_sent",
        addr = %socket_addr,
        command = ?command
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::Target;
    use std::io::Read;
    use std::net::TcpListener;

    #[test]
    fn test_send_writes_command_line() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let server = std::thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = String::new();
            conn.read_to_string(&mut received).unwrap();
            received
        });

        let command = ControlCommand::SetTarget(Target::new("http://x").unwrap());
        send_command(&addr, &command, Duration::from_secs(2)).unwrap();

        assert_eq!(server.join().unwrap(), "http://x\n");
    }

    #[test]
    fn test_send_to_closed_port_fails() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };

        let err = send_command(&addr, &ControlCommand::Exit, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ControlError::ConnectFailed { .. }));
    }

    #[test]
    fn test_unresolvable_address() {
        let err = send_command("not an address", &ControlCommand::Exit, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ControlError::AddressUnresolved { .. }));
    }
}

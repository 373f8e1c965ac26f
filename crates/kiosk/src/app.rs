use std::net::IpAddr;

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("kiosk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keep a full-screen display on one target and control it over the network")
        .long_about("kiosk runs a browser across every monitor and keeps it on a target page. The page reloads every minute and whenever the network changes; while the network is unreachable an offline page is shown instead. A running controller accepts a new target, or 'exit', over TCP.")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Start the controller and the display (exits with status 1 when stopped)")
                .arg(
                    Arg::new("targets-file")
                        .long("targets-file")
                        .short('t')
                        .help("Targets file, one target per line (overrides config)")
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("Control port (overrides config, default: 12345)")
                        .value_parser(value_parser!(u16))
                )
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .help("Address to listen on instead of the primary IPv4 address")
                        .value_parser(value_parser!(IpAddr))
                )
        )
        .subcommand(
            Command::new("send")
                .about("Point a running controller at a new target")
                .arg(
                    Arg::new("target")
                        .help("URL or file:// reference to display")
                        .required(true)
                        .index(1)
                )
                .arg(host_arg())
                .arg(port_arg())
        )
        .subcommand(
            Command::new("stop")
                .about("Stop a running controller")
                .arg(host_arg())
                .arg(port_arg())
        )
}

fn host_arg() -> Arg {
    Arg::new("host")
        .long("host")
        .help("Controller address (default: this host's primary IPv4 address)")
}

fn port_arg() -> Arg {
    Arg::new("port")
        .long("port")
        .short('p')
        .help("Controller port (overrides config, default: 12345)")
        .value_parser(value_parser!(u16))
}

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::{
        NonEmptyStringValueParser,
        styling::{AnsiColor, Effects, Styles},
    },
};
use std::path::PathBuf;

/// Pure clap command definitions with zero business logic
#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(crate::VERSION)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("domain")
                .help("Domain name to check")
                .required(true)
                .value_parser(NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("port")
                .default_value(crate::tls::DEFAULT_PORT)
                .help("Port number"),
        )
        .arg(
            Arg::new("timeout")
                .default_value("10")
                .env("TLX_TIMEOUT")
                .help("seconds to wait for the TCP connection and TLS handshake")
                .long("timeout")
                .short('t')
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("verify")
                .action(ArgAction::SetTrue)
                .env("TLX_VERIFY")
                .help("Validate the certificate chain against trusted roots")
                .long("verify")
                .long_help(
                    "Validate the presented chain against trusted roots.\n\n\
                    Off by default: the certificate is inspected whether it is trusted, \
                    self-signed or already expired. With --verify an untrusted chain \
                    fails the handshake.",
                ),
        )
        .arg(
            Arg::new("ca-file")
                .env("TLX_CA_FILE")
                .help("PEM bundle of trust anchors used with --verify")
                .long("ca-file")
                .long_help(
                    "PEM bundle of trust anchors used instead of the bundled Mozilla roots.\n\
                    Requires --verify.\n\n\
                    Example: /etc/ssl/certs/internal-ca.pem",
                )
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .requires("verify"),
        )
        .arg(
            Arg::new("json")
                .action(ArgAction::SetTrue)
                .help("Print the report as JSON")
                .long("json")
                .short('j'),
        )
        .arg(
            Arg::new("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output")
                .long("no-color"),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .long("verbose")
                .short('v'),
        )
}

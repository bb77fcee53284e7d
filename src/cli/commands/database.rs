use clap::{Arg, Command};

pub const ARG_DSN: &str = "dsn";
pub const ARG_MAX_CONNECTIONS: &str = "max-connections";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "PostgreSQL connection string. When omitted, users are kept in memory and lost on restart.",
                )
                .env("USERSIGNUP_DSN"),
        )
        .arg(
            Arg::new(ARG_MAX_CONNECTIONS)
                .long("max-connections")
                .help("Maximum number of database connections")
                .default_value("5")
                .env("USERSIGNUP_MAX_CONNECTIONS")
                .value_parser(clap::value_parser!(u32).range(1..=100)),
        )
}

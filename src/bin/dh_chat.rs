//! Interactive Alice/Bob chat with an optional man-in-the-middle relay through Eve.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use dh_relay::{
    confirms, Command, ExchangeConfig, ExchangeSession, Party, PartyPair, RelayController,
    RelayMode, RelayTrace,
};
use env_logger::Env;
use log::{error, LevelFilter};

#[derive(Parser)]
#[command(
    name = "dh-chat",
    author,
    version,
    about = "Toy Diffie-Hellman chat between Alice and Bob, with Eve optionally in the middle"
)]
struct Cli {
    /// Size of the safe prime in bits.
    #[arg(long, default_value_t = dh_relay::config::KEY_LENGTH)]
    bits: usize,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn print_session(session: &ExchangeSession) {
    let params = session.params();
    let agreement = session.agreement();
    println!("--- epoch {} ---", session.epoch());
    println!("prime:     {}", params.prime);
    println!("generator: {}", params.generator);
    for party in Party::ALL {
        let keys = agreement.keys(party);
        println!("{:<5} secret: {}", party, keys.secret());
        println!("{:<5} public: {}", party, keys.public());
    }
    for pair in PartyPair::ALL {
        let name = pair.to_string();
        if let Ok(shared) = agreement.shared_secret(pair) {
            println!("{:<9} shared: {}", name, shared);
        }
        println!("{:<9} key:    {}", name, session.key(pair));
    }
    println!();
}

fn print_trace(trace: &RelayTrace) {
    for hop in &trace.hops {
        println!(
            "[{} -> {} via {}] ciphertext: {}",
            hop.from,
            hop.to,
            hop.channel,
            hop.ciphertext_hex()
        );
        println!("[{} reads] {}", hop.to, hop.recovered_text());
    }
}

fn prompt(stdin: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush().context("flushing stdout")?;
    let mut line = String::new();
    let read = stdin.read_line(&mut line).context("reading stdin")?;
    Ok((read > 0).then_some(line))
}

fn renew(controller: &mut RelayController) {
    match controller.initialize_or_renew() {
        Ok(session) => print_session(session),
        Err(e) => error!("renewal failed, keeping epoch {}: {}", controller.session().epoch(), e),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = ExchangeConfig::with_key_bits(cli.bits);
    config.seed = cli.seed;

    println!("{}\n", Command::HELP);
    let mut controller =
        RelayController::new(config).context("establishing the first epoch")?;
    print_session(controller.session());

    let mut stdin = io::stdin().lock();
    loop {
        let label = format!("{}: ", controller.turn());
        let Some(line) = prompt(&mut stdin, &label)? else {
            break;
        };

        match Command::parse(&line) {
            Command::Help => println!("{}", Command::HELP),
            Command::Renew => renew(&mut controller),
            Command::ToggleRelay => {
                let mode = controller.toggle_relay_mode()?;
                match mode {
                    RelayMode::Intercepted => println!("Eve is now relaying every message."),
                    RelayMode::Direct => println!("Alice and Bob are talking directly again."),
                }
                let answer = prompt(&mut stdin, "Would you like to renew the keys? (y/n) ")?;
                if answer.as_deref().is_some_and(confirms) {
                    renew(&mut controller);
                }
            }
            Command::Exit => break,
            Command::Message(text) => match controller.send(text.as_bytes()) {
                Ok(trace) => print_trace(&trace),
                Err(e) => error!("message not delivered: {}", e),
            },
        }
    }

    controller.terminate();
    Ok(())
}

use std::io;
use std::process;

use log::{error, info};

use sha256_stream::{prompt, selftest, Error};

fn run() -> Result<bool, Error> {
    println!("SHA-256 HASHING ALGORITHM\n");

    let outcomes = selftest::run()?;
    for outcome in &outcomes {
        print!("{}", outcome);
    }
    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed > 0 {
        error!("{} of {} self tests failed", failed, outcomes.len());
        return Ok(false);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let lines = prompt::digest_lines(stdin.lock(), stdout.lock())?;
    info!("hashed {} lines", lines);
    Ok(true)
}

fn main() {
    // Setup logging
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("sha256: {}", e);
            process::exit(1);
        }
    }
}

use std::{env, path::PathBuf, process};

use clap::Parser;

/// Run prechecks on all active DR plans for a disaster-recovery
/// protection group.
#[derive(Parser)]
#[command(name = "dr-precheck")]
struct Args {
    /// Protection group ocid
    #[arg(long, value_name = "OCID")]
    drpg_ocid: String,

    /// Notification topic ocid, failures are published there when set
    #[arg(long, value_name = "OCID")]
    ons_topic_ocid: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if let Err(err) =
        dr_precheck::do_precheck(&args.drpg_ocid, args.ons_topic_ocid.as_deref(), &base_dir).await
    {
        eprintln!("precheck not passed: {}", err);
        process::exit(1);
    }
    println!("precheck finished.");
}

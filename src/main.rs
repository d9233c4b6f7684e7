use clap::{Parser, Subcommand};
use miiplaza::probe::Classifier;
use miiplaza::{check_snapshot, probe, ParseOptions, PlazaSnapshot, SchemaVersion, StaticTitles, TitleResolver};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "miiplaza", about = "Decode a StreetPass Mii Plaza save (meet.dat)")]
struct Cli {
    /// Record layout: v1 (early) or v2 (current)
    #[arg(long, global = true, default_value = "v2")]
    schema: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show plaza counters and record count
    Info {
        input: PathBuf,
    },
    /// Print one JSON row per Mii
    List {
        input: PathBuf,
        /// JSON title databases ({"<game id>": "<title>"}); later files win
        #[arg(short, long, num_args = 1..)]
        titles: Vec<PathBuf>,
    },
    /// Print one JSON row per Mii with its unknown bytes (or bits)
    Unknown {
        input: PathBuf,
        #[arg(long)]
        bits: bool,
    },
    /// Check the always-zero positions of every record
    Check {
        input: PathBuf,
    },
    /// Hex dump of the whole save
    Dump {
        input: PathBuf,
        #[arg(short, long, default_value = "16")]
        width: usize,
    },
    /// Search unknown bits for windows that separate a labelled set of Miis
    Probe {
        input: PathBuf,
        /// JSON array of {"name", "creator", "label"} objects
        #[arg(short, long)]
        classifier: PathBuf,
        /// Window width in bits
        #[arg(short, long, default_value = "1")]
        bits: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = ParseOptions { schema: parse_schema(&cli.schema)? };

    match cli.command {

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            println!("── Mii Plaza save ───────────────────────────────────────");
            println!("  Path              {}", input.display());
            println!("  Layout            {}", snap.schema.name());
            println!("  Miis              {}", snap.records.len());
            println!("  StreetPass tags   {}", snap.street_pass_tags);
            println!("  Tickets           {}", snap.tickets);
            println!("  Fantastic ratings {}", snap.fantastic_ratings);
            println!("  Diagnostics       {}", snap.diagnostics.len());
            for d in &snap.diagnostics {
                println!("    {d}");
            }
        }

        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { input, titles } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            let mut db = StaticTitles::new();
            for path in &titles {
                db.merge_json(&std::fs::read(path)?)?;
            }
            let resolver = TitleResolver::new(&db);
            let rows = if titles.is_empty() {
                snap.rows()
            } else {
                snap.rows_with_titles(&resolver)
            };
            for row in rows {
                println!("{}", serde_json::to_string(&row)?);
            }
        }

        // ── Unknown ──────────────────────────────────────────────────────────
        Commands::Unknown { input, bits } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            let rows = if bits { snap.unknown_bits_rows() } else { snap.unknown_bytes_rows() };
            for row in rows {
                println!("{}", serde_json::to_string(&row)?);
            }
        }

        // ── Check ────────────────────────────────────────────────────────────
        Commands::Check { input } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            let violations = check_snapshot(&snap);
            if violations.is_empty() {
                println!("All {} record(s) match layout {}", snap.records.len(), snap.schema.name());
            } else {
                for v in &violations {
                    println!("  {v}");
                }
                println!("{} violation(s): offsets need re-deriving for this save", violations.len());
            }
        }

        // ── Dump ─────────────────────────────────────────────────────────────
        Commands::Dump { input, width } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            print!("{}", snap.hexdump(width));
        }

        // ── Probe ────────────────────────────────────────────────────────────
        Commands::Probe { input, classifier, bits } => {
            let snap = PlazaSnapshot::open(&input, &opts)?;
            let classifier = Classifier::from_json(&std::fs::read(&classifier)?)?;
            let found = probe(&snap, &classifier, bits)?;
            println!("{} candidate window(s) of {} bit(s):", found.len(), bits);
            for w in &found {
                println!("  {w}");
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn parse_schema(s: &str) -> Result<SchemaVersion, Box<dyn std::error::Error>> {
    SchemaVersion::from_name(s).ok_or_else(|| format!("unknown schema '{s}', expected v1 or v2").into())
}

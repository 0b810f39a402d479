// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::Path;

// Use library instead of local modules
use gallery_catalog::{write_gallery_exports, ExportProfile, Gallery, LoadSummary, VERSION};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_ui_mode()?,
        Some("check") => run_check(&args)?,
        Some("export") => run_export(&args)?,
        Some("help") | Some("--help") | Some("-h") => print_usage(),
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}

// Diagnostics go to stderr so piped command output stays clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(args: &[String]) -> Result<()> {
    let data_dir = args.get(2).map(String::as_str).unwrap_or("data");

    println!("🗂️  Gallery Catalog v{} - Fixture Check", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n📂 Loading fixtures from {}/ ...", data_dir);

    let mut gallery = Gallery::new();
    let summaries = gallery.load_dir(Path::new(data_dir));

    println!();
    for (step, summary) in summaries.iter().enumerate() {
        print_summary(step + 1, summary);
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Total entities: {}", gallery.total_entities());
    println!(
        "✓ Next codes: {} / {} / {}",
        gallery.artworks.next_code(),
        gallery.exhibitions.next_code(),
        gallery.lectures.next_code()
    );

    Ok(())
}

fn print_summary(step: usize, summary: &LoadSummary) {
    match &summary.error {
        None => println!(
            "{}. ✓ {}: {} records from {}",
            step,
            summary.kind.plural(),
            summary.loaded,
            summary.fixture
        ),
        Some(err) => println!(
            "{}. ⚠️  {}: starting empty ({})",
            step,
            summary.kind.plural(),
            err
        ),
    }
}

fn run_export(args: &[String]) -> Result<()> {
    let profile_arg = args.get(2).map(String::as_str).unwrap_or("all");
    let data_dir = args.get(3).map(String::as_str).unwrap_or("data");
    let out_dir = args.get(4).map(String::as_str).unwrap_or("exports");

    let profiles: Vec<ExportProfile> = if profile_arg == "all" {
        ExportProfile::all().to_vec()
    } else {
        match ExportProfile::from_name(profile_arg) {
            Some(profile) => vec![profile],
            None => {
                eprintln!(
                    "❌ Unknown profile: {} (expected internal, external or all)",
                    profile_arg
                );
                std::process::exit(2);
            }
        }
    };

    println!("📦 Gallery Catalog v{} - Export", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading fixtures from {}/ ...", data_dir);
    let mut gallery = Gallery::new();
    for summary in gallery.load_dir(Path::new(data_dir)) {
        if let Some(err) = &summary.error {
            println!("⚠️  {}: starting empty ({})", summary.kind.plural(), err);
        }
    }
    println!("✓ Loaded {} entities", gallery.total_entities());

    println!("\n💾 Writing projections to {}/ ...", out_dir);
    let mut written = 0;
    for profile in profiles {
        let paths = write_gallery_exports(&mut gallery, profile, Path::new(out_dir))?;
        for path in &paths {
            println!("  ✓ {}", path.display());
        }
        written += paths.len();
    }

    println!("\n🎉 Export complete: {} files", written);

    Ok(())
}

fn print_usage() {
    println!("Gallery Catalog v{}", VERSION);
    println!();
    println!("Usage:");
    println!("  gallery-catalog                          Interactive TUI (default)");
    println!("  gallery-catalog check [data_dir]         Load fixtures, report counts and next codes");
    println!("  gallery-catalog export [profile] [data_dir] [out_dir]");
    println!("                                           Write projection files (profile: internal,");
    println!("                                           external or all; out_dir defaults to exports/)");
    println!("  gallery-catalog help                     Show this message");
    println!();
    println!("Environment:");
    println!("  GALLERY_DATA_DIR   Fixture directory for the TUI (default: data)");
    println!("  RUST_LOG           Diagnostic filter, e.g. gallery_catalog=debug");
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let data_dir = env::var("GALLERY_DATA_DIR").unwrap_or_else(|_| "data".to_string());

    println!("🖥️  Loading Gallery Catalog UI...\n");
    println!("📊 Loading fixtures from {}/ ...", data_dir);

    let mut gallery = Gallery::new();
    for summary in gallery.load_dir(Path::new(&data_dir)) {
        match &summary.error {
            None => println!("✓ {}: {} records", summary.kind.plural(), summary.loaded),
            Some(err) => println!("⚠️  {}: starting empty ({})", summary.kind.plural(), err),
        }
    }

    println!("\nStarting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(gallery);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the web API: cargo run --bin gallery-server --features server");
    std::process::exit(1);
}

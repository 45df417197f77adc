//! texpand CLI - LaTeX snippet expansion and LaTeX → Unicode conversion

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use texpand::{
    default_snippet_table,
    diagnostics::{check_snippet_table, format_diagnostics},
    files::StdSnippetSource,
    SnippetEngine, SnippetTable, SymbolConverter, UnicodeOptions,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "texpand")]
#[command(version)]
#[command(about = "texpand - LaTeX snippet expansion and LaTeX → Unicode conversion", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert LaTeX to a Unicode approximation
    Unicode {
        /// Input file path (reads from stdin if not provided)
        input: Option<String>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<String>,

        /// Only replace commands; keep scripts and fractions as LaTeX
        #[arg(long)]
        symbols_only: bool,

        /// Keep `\frac{..}{..}` as written
        #[arg(long)]
        no_fractions: bool,
    },

    /// Expand the trigger before the cursor, as an editor would on a keystroke
    Expand {
        /// Buffer contents
        text: String,

        /// Cursor byte offset (end of the text if not provided)
        #[arg(short, long)]
        cursor: Option<usize>,

        /// Snippet table JSON (bundled table if not provided)
        #[arg(short, long)]
        snippets: Option<String>,

        /// Press Tab this many times after expanding
        #[arg(short, long, default_value_t = 0)]
        tabs: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a snippet table for problems
    Check {
        /// Snippet table JSON (bundled table if not provided)
        snippets: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the triggers of a snippet table
    Snippets {
        /// Snippet table JSON (bundled table if not provided)
        snippets: Option<String>,

        /// Only list this category
        #[arg(long)]
        category: Option<String>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Unicode {
            input,
            output,
            symbols_only,
            no_fractions,
        } => {
            let source = match input {
                Some(ref path) => fs::read_to_string(path)?,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let mut options = if symbols_only {
                UnicodeOptions::symbols_only()
            } else {
                UnicodeOptions::default()
            };
            if no_fractions {
                options.fractions = false;
            }

            let converter = SymbolConverter::with_options(options);
            let result = match converter.try_convert(&source) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            match output {
                Some(ref path) => {
                    fs::write(path, &result)?;
                    eprintln!("✓ Output written to: {}", path);
                }
                None => {
                    io::stdout().write_all(result.as_bytes())?;
                }
            }
        }

        Commands::Expand {
            text,
            cursor,
            snippets,
            tabs,
            json,
        } => {
            let table = load_table(snippets.as_deref());
            let mut engine = SnippetEngine::with_table(table);

            let cursor = cursor.unwrap_or(text.len());
            let mut edit = engine.process_text(&text, cursor);
            let mut steps = vec![edit.clone()];

            for _ in 0..tabs {
                edit = engine.handle_tab(&edit.text, edit.cursor_position);
                steps.push(edit.clone());
            }

            if json {
                let rendered = serde_json::to_string_pretty(&steps).map_err(io::Error::other)?;
                println!("{}", rendered);
            } else {
                for (i, step) in steps.iter().enumerate() {
                    let label = if i == 0 {
                        "expand".to_string()
                    } else {
                        format!("tab {}", i)
                    };
                    let selection = match step.select_range {
                        Some((start, end)) => {
                            format!(" select {}..{} '{}'", start, end, &step.text[start..end])
                        }
                        None => String::new(),
                    };
                    println!(
                        "{:>7}: {} (cursor {}{})",
                        label, step.text, step.cursor_position, selection
                    );
                }
                if engine.has_active_snippet() {
                    println!("session: active");
                }
            }
        }

        Commands::Check { snippets, no_color } => {
            let table = load_table(snippets.as_deref());
            let result = check_snippet_table(&table);
            println!("{}", format_diagnostics(&result, !no_color));
            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Snippets {
            snippets,
            category,
            json,
        } => {
            let table = load_table(snippets.as_deref());

            if json {
                match table.to_json_pretty() {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
                return Ok(());
            }

            for (name, entries) in table.categories() {
                if category.as_deref().is_some_and(|c| c != name) {
                    continue;
                }
                match &entries.condition {
                    Some(condition) => println!("[{}] ({})", name, condition),
                    None => println!("[{}]", name),
                }
                for (trigger, template) in &entries.snippets {
                    println!("  {:<8} {}", trigger, template);
                }
                println!();
            }
            println!("{} triggers", table.len());
        }

        Commands::Info => {
            println!("texpand - LaTeX snippet expansion and LaTeX → Unicode conversion");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Trigger expansion with activation conditions");
            println!("  ✓ Tab-stop navigation with nested fractions");
            println!("  ✓ LaTeX → Unicode (symbols, scripts, vulgar fractions)");
            println!("  ✓ Snippet table diagnostics");
            println!();
            let table = default_snippet_table();
            println!("Bundled table: {} triggers", table.len());
            println!(
                "Unicode symbols: {}",
                texpand::symbols::UNICODE_SYMBOLS.len()
            );
            println!();
        }
    }

    Ok(())
}

/// Load a table from `path`, or the bundled one; exits on a bad file
#[cfg(feature = "cli")]
fn load_table(path: Option<&str>) -> SnippetTable {
    let Some(path) = path else {
        return default_snippet_table();
    };

    let source = StdSnippetSource::new();
    match SnippetTable::load(&source, path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error loading snippet table '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texpand --features cli");
    eprintln!("  texpand <COMMAND>");
}

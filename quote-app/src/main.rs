use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quote_app::commands::{self, print_draft_summary};
use quote_app::config::AppConfig;
use quote_app::session::DraftSession;
use quote_core::Adjustment;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Gerador de orçamentos comerciais para serviços de impermeabilização.
///
/// Manages the materials catalog, assembles a quote draft block by block,
/// renders the branded PDF proposal and keeps the history ledger.
#[derive(Debug, Parser)]
#[command(name = "quote", version)]
struct Cli {
    /// Configuration file.
    #[arg(long, default_value = "quote.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage the materials price list.
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Inspect the ledger of generated quotes.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Edit the draft session file.
    Draft {
        /// Draft session file.
        #[arg(long, default_value = "rascunho.toml")]
        file: PathBuf,

        #[command(subcommand)]
        action: DraftAction,
    },

    /// Validate the draft, render the PDF proposal and append it to the
    /// history ledger.
    Generate {
        /// Draft session file.
        #[arg(long, default_value = "rascunho.toml")]
        file: PathBuf,
    },

    /// Print the WhatsApp handoff link for the current draft.
    Link {
        /// Draft session file.
        #[arg(long, default_value = "rascunho.toml")]
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogAction {
    /// List all catalog items.
    List,

    /// Add one item to the catalog.
    Add {
        name: String,

        /// Standard unit price (e.g. 950.00).
        price: Decimal,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove an item by exact name.
    Remove { name: String },

    /// Replace the catalog from an exported CSV backup.
    Restore { file: PathBuf },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List every generated quote and the summed total.
    List,
}

#[derive(Debug, Subcommand)]
enum DraftAction {
    /// Start a fresh draft, replacing any existing session file.
    New,

    /// Print the draft with its current totals.
    Show,

    /// Set the client identification fields.
    SetClient {
        name: String,

        #[arg(long, default_value = "")]
        tax_id: String,

        /// Contact number for the WhatsApp handoff link.
        #[arg(long)]
        contact: Option<String>,
    },

    /// Append a service block.
    AddBlock { title: String },

    /// Remove a service block (1-based index).
    RemoveBlock { block: usize },

    /// Set a block's damage diagnosis text.
    SetDamage {
        block: usize,
        text: String,
    },

    /// Set a block's technical solution description.
    SetDescription {
        block: usize,
        text: String,
    },

    /// Add a material line to a block, snapshotting the catalog price
    /// unless --price overrides it.
    AddMaterial {
        block: usize,
        name: String,

        #[arg(long, default_value = "1")]
        qty: Decimal,

        #[arg(long)]
        price: Option<Decimal>,
    },

    /// Change the quantity of a material line (1-based indices).
    SetQuantity {
        block: usize,
        line: usize,
        qty: Decimal,
    },

    /// Change the unit price of a material line.
    SetPrice {
        block: usize,
        line: usize,
        price: Decimal,
    },

    /// Remove one material line.
    RemoveMaterial {
        block: usize,
        line: usize,
    },

    /// Remove every material line of a block.
    ClearMaterials { block: usize },

    /// Set a block's labor cost.
    SetLabor {
        block: usize,
        value: Decimal,
    },

    /// Attach a photo to a block (up to three).
    AddPhoto {
        block: usize,
        path: PathBuf,
    },

    /// Detach a photo (1-based index).
    RemovePhoto {
        block: usize,
        photo: usize,
    },

    /// Apply a margin (positive) or discount (negative) percentage,
    /// clamped to [-50, 50].
    SetAdjustment { percent: Decimal },

    /// Override the final total with a manually confirmed value.
    SetOverride { value: Decimal },

    /// Drop any adjustment; the final total becomes the subtotal again.
    ClearAdjustment,

    /// Set the commercial terms text.
    SetTerms { text: String },

    /// Set the footer observations text.
    SetNotes { text: String },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Catalog { action } => match action {
            CatalogAction::List => commands::catalog_list(&config),
            CatalogAction::Add {
                name,
                price,
                description,
            } => commands::catalog_add(&config, &name, &description, price),
            CatalogAction::Remove { name } => commands::catalog_remove(&config, &name),
            CatalogAction::Restore { file } => commands::catalog_restore(&config, &file),
        },

        Command::History { action } => match action {
            HistoryAction::List => commands::history_list(&config),
        },

        Command::Draft { file, action } => draft_command(&config, &DraftSession::new(file), action),

        Command::Generate { file } => {
            commands::generate(&config, &DraftSession::new(file)).map(|_| ())
        }

        Command::Link { file } => commands::link(&DraftSession::new(file)).map(|_| ()),
    }
}

/// One reducer step: load the draft, apply the single requested mutation,
/// save it back, and re-render the summary from the new state.
fn draft_command(
    config: &AppConfig,
    session: &DraftSession,
    action: DraftAction,
) -> Result<()> {
    if let DraftAction::New = action {
        let draft = session.create()?;
        println!("Novo rascunho em {}", session.path().display());
        print_draft_summary(&draft);
        return Ok(());
    }
    if let DraftAction::Show = action {
        print_draft_summary(&session.load()?);
        return Ok(());
    }

    // Catalog lookups happen before the session opens, so a failed lookup
    // cannot leave a half-applied draft behind.
    let resolved_price = match &action {
        DraftAction::AddMaterial { name, price, .. } => match price {
            Some(p) => Some(*p),
            None => Some(commands::catalog_price(config, name)?),
        },
        _ => None,
    };

    let draft = session.update(|draft| -> Result<(), quote_core::DraftError> {
        match action {
            DraftAction::New | DraftAction::Show => {}
            DraftAction::SetClient {
                name,
                tax_id,
                contact,
            } => {
                draft.client_name = name;
                draft.client_tax_id = tax_id;
                draft.contact_number = contact;
            }
            DraftAction::AddBlock { title } => {
                draft.add_block(title);
            }
            DraftAction::RemoveBlock { block } => {
                draft.remove_block(block.saturating_sub(1))?;
            }
            DraftAction::SetDamage { block, text } => {
                draft.block_mut(block.saturating_sub(1))?.damage_description =
                    (!text.trim().is_empty()).then_some(text);
            }
            DraftAction::SetDescription { block, text } => {
                draft
                    .block_mut(block.saturating_sub(1))?
                    .technical_description = text;
            }
            DraftAction::AddMaterial {
                block, name, qty, ..
            } => {
                if let Some(price) = resolved_price {
                    draft.add_material_line(block.saturating_sub(1), name, qty, price)?;
                }
            }
            DraftAction::SetQuantity { block, line, qty } => {
                draft.set_line_quantity(block.saturating_sub(1), line.saturating_sub(1), qty)?;
            }
            DraftAction::SetPrice { block, line, price } => {
                draft.set_line_unit_price(
                    block.saturating_sub(1),
                    line.saturating_sub(1),
                    price,
                )?;
            }
            DraftAction::RemoveMaterial { block, line } => {
                draft.remove_line(block.saturating_sub(1), line.saturating_sub(1))?;
            }
            DraftAction::ClearMaterials { block } => {
                draft.clear_lines(block.saturating_sub(1))?;
            }
            DraftAction::SetLabor { block, value } => {
                draft.set_labor_cost(block.saturating_sub(1), value)?;
            }
            DraftAction::AddPhoto { block, path } => {
                draft.add_photo(block.saturating_sub(1), path)?;
            }
            DraftAction::RemovePhoto { block, photo } => {
                draft.remove_photo(block.saturating_sub(1), photo.saturating_sub(1))?;
            }
            DraftAction::SetAdjustment { percent } => {
                draft.adjustment = Adjustment::percent(percent);
            }
            DraftAction::SetOverride { value } => {
                draft.adjustment = Adjustment::Override(value);
            }
            DraftAction::ClearAdjustment => {
                draft.adjustment = Adjustment::None;
            }
            DraftAction::SetTerms { text } => {
                draft.commercial_terms_text = text;
            }
            DraftAction::SetNotes { text } => {
                draft.footer_notes = text;
            }
        }
        Ok(())
    })?;

    print_draft_summary(&draft);
    Ok(())
}

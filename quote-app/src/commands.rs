//! Command implementations for the CLI shell.
//!
//! Each command is a full cycle: read the stores/session it needs, apply
//! one change, write back, print what a user needs to see. Validation
//! failures abort before anything is written, so a rejected generation can
//! never leave a half-produced document or a stray history row behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use quote_core::format::format_brl;
use quote_core::{
    CatalogStore, HistoryEntry, HistoryLog, MaterialRecord, QuoteDraft, StoreError,
};
use quote_render::{proposal_file_name, render_proposal};
use quote_store_csv::{CsvCatalogStore, CsvHistoryLog};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::AppConfig;
use crate::session::DraftSession;
use crate::whatsapp;

fn catalog(config: &AppConfig) -> CsvCatalogStore {
    CsvCatalogStore::new(&config.files.catalog)
}

fn history(config: &AppConfig) -> CsvHistoryLog {
    CsvHistoryLog::new(&config.files.history)
}

// ─── catalog ─────────────────────────────────────────────────────────────────

pub fn catalog_list(config: &AppConfig) -> Result<()> {
    let records = catalog(config).load()?;
    for record in &records {
        println!(
            "{:<45} {:<30} R$ {:>12}",
            record.name,
            record.description,
            format_brl(record.unit_price)
        );
    }
    println!("{} itens", records.len());
    Ok(())
}

pub fn catalog_add(
    config: &AppConfig,
    name: &str,
    description: &str,
    unit_price: Decimal,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("o nome do item não pode ficar vazio");
    }
    if unit_price.is_sign_negative() {
        bail!("o preço não pode ser negativo");
    }
    let store = catalog(config);
    let mut records = store.load()?;
    records.push(MaterialRecord::new(name.trim(), description.trim(), unit_price));
    store.save(&records)?;
    println!("Item salvo: {}", name.trim());
    Ok(())
}

pub fn catalog_remove(
    config: &AppConfig,
    name: &str,
) -> Result<()> {
    let store = catalog(config);
    let mut records = store.load()?;
    let before = records.len();
    records.retain(|r| r.name != name);
    if records.len() == before {
        bail!("nenhum item chamado '{name}' no catálogo");
    }
    store.save(&records)?;
    println!("Removido: {name}");
    Ok(())
}

/// Restores the catalog from a previously exported CSV. A malformed backup
/// is reported and the current table is left exactly as it was.
pub fn catalog_restore(
    config: &AppConfig,
    backup: &Path,
) -> Result<()> {
    let text = std::fs::read_to_string(backup)
        .with_context(|| format!("cannot read backup: {}", backup.display()))?;
    match catalog(config).restore(&text) {
        Ok(rows) => {
            println!("Catálogo restaurado: {rows} itens");
            Ok(())
        }
        Err(StoreError::InvalidBackup(_)) => {
            bail!("arquivo de backup inválido; o catálogo atual foi mantido")
        }
        Err(other) => Err(other.into()),
    }
}

// ─── history ─────────────────────────────────────────────────────────────────

pub fn history_list(config: &AppConfig) -> Result<()> {
    let rows = history(config).load()?;
    if rows.is_empty() {
        println!("Nenhum orçamento gerado ainda.");
        return Ok(());
    }
    let mut sold = Decimal::ZERO;
    for row in &rows {
        sold += row.total;
        println!(
            "{}  {:<35} R$ {:>12}",
            row.date,
            row.client_name,
            format_brl(row.total)
        );
    }
    println!("Total vendido: R$ {}", format_brl(sold));
    Ok(())
}

// ─── generation ──────────────────────────────────────────────────────────────

/// Everything `generate` produced, for the caller (and the tests) to verify.
#[derive(Debug)]
pub struct GeneratedQuote {
    pub pdf_path: PathBuf,
    pub total: Decimal,
    pub whatsapp_link: Option<String>,
}

pub fn generate(
    config: &AppConfig,
    session: &DraftSession,
) -> Result<GeneratedQuote> {
    let draft = session.load()?;
    validate_for_generation(&draft)?;

    let issue_date = Local::now().date_naive();
    let totals = draft.totals();

    let bytes = render_proposal(&draft, &config.branding(), issue_date)?;
    std::fs::create_dir_all(&config.files.output_dir)?;
    let pdf_path = config
        .files
        .output_dir
        .join(proposal_file_name(&draft.client_name));
    std::fs::write(&pdf_path, &bytes)
        .with_context(|| format!("cannot write proposal: {}", pdf_path.display()))?;

    let whatsapp_link = draft
        .contact_number
        .as_deref()
        .and_then(|number| whatsapp::build_link(number, &draft.client_name, totals.final_total));

    // The document exists; only now does the quote enter the ledger.
    history(config).append(&HistoryEntry::new(
        issue_date,
        draft.client_name.clone(),
        totals.final_total,
        whatsapp_link.clone(),
    ))?;

    info!(
        client = %draft.client_name,
        total = %totals.final_total,
        pdf = %pdf_path.display(),
        "proposal generated"
    );
    println!("Orçamento gerado: {}", pdf_path.display());
    println!("Total final: R$ {}", format_brl(totals.final_total));
    if let Some(link) = &whatsapp_link {
        println!("Enviar por WhatsApp: {link}");
    }

    Ok(GeneratedQuote {
        pdf_path,
        total: totals.final_total,
        whatsapp_link,
    })
}

fn validate_for_generation(draft: &QuoteDraft) -> Result<()> {
    if draft.client_name.trim().is_empty() {
        bail!("preencha o nome do cliente antes de gerar o orçamento");
    }
    if draft.blocks.is_empty() {
        bail!("o orçamento não tem nenhum serviço; use `draft add-block`");
    }
    Ok(())
}

/// Prints the WhatsApp link without generating anything.
pub fn link(session: &DraftSession) -> Result<Option<String>> {
    let draft = session.load()?;
    let totals = draft.totals();
    let link = draft
        .contact_number
        .as_deref()
        .and_then(|number| whatsapp::build_link(number, &draft.client_name, totals.final_total));
    match &link {
        Some(link) => println!("{link}"),
        None => println!("Nenhum número de contato no rascunho."),
    }
    Ok(link)
}

// ─── draft display ───────────────────────────────────────────────────────────

/// Renders the session summary after every mutation: the textual
/// counterpart of the proposal, always derived from current state.
pub fn print_draft_summary(draft: &QuoteDraft) {
    let totals = draft.totals();
    println!("Cliente: {}", draft.client_name);
    for (index, block) in draft.blocks.iter().enumerate() {
        println!(
            "  {}. {} ({} materiais, {} fotos) total R$ {}",
            index + 1,
            block.title,
            block.materials.len(),
            block.photos.len(),
            format_brl(block.block_total())
        );
        for line in &block.materials {
            println!(
                "       {} x{} = R$ {}",
                line.material_name,
                line.quantity,
                format_brl(line.line_total)
            );
        }
    }
    println!("Subtotal: R$ {}", format_brl(totals.subtotal));
    if totals.has_adjustment() {
        let label = if totals.is_discount() { "Desconto" } else { "Ajuste" };
        println!("{label}: R$ {}", format_brl(totals.adjustment_value));
    }
    println!("Total final: R$ {}", format_brl(totals.final_total));
}

/// Snapshot price lookup used when `draft add-material` is called without
/// an explicit price.
pub fn catalog_price(
    config: &AppConfig,
    name: &str,
) -> Result<Decimal> {
    let records = catalog(config).load()?;
    records
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.unit_price)
        .with_context(|| format!("'{name}' não está no catálogo; informe --price"))
}

//! Bodies of the `search`, `summary`, `compare`, `budget` and `tokens` commands.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde_json::json;
use spendlens_core::{
    GroupBy, Period, Transaction, TransactionFilter, budget_status, compare_spending,
    filter_transactions, parse_query, summarize, total_spent,
};
use spendlens_ingest::load_transactions;
use std::path::{Path, PathBuf};

use crate::SourceArgs;
use crate::config::Config;

pub struct SummaryOptions {
    pub query: Option<String>,
    pub group_by: Option<GroupBy>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub struct CompareOptions {
    pub current: Period,
    pub previous: Period,
    pub category: Option<String>,
    pub json: bool,
}

fn data_file(file: Option<&Path>, cfg: &Config) -> PathBuf {
    file.map(Path::to_path_buf).unwrap_or_else(|| cfg.data.file.clone())
}

fn load(file: Option<&Path>, cfg: &Config) -> Result<Vec<Transaction>> {
    let path = data_file(file, cfg);
    if !path.exists() {
        bail!(
            "transaction export not found: {} (pass --file <path> or set [data] file in the config)",
            path.display()
        );
    }
    tracing::debug!(path = %path.display(), "reading export");
    load_transactions(&path).with_context(|| format!("loading {}", path.display()))
}

fn prefilter(source: &SourceArgs) -> TransactionFilter {
    TransactionFilter {
        start: source.from,
        end: source.to,
        category: source.category.clone(),
        min_amount: source.min_amount,
    }
}

/// Load, narrow with the pre-filter, then apply the search query.
fn select<'a>(txns: &'a [Transaction], source: &SourceArgs, query: &str) -> Vec<&'a Transaction> {
    let scoped = prefilter(source).apply(txns);
    filter_transactions(&scoped, query)
}

fn print_row(t: &Transaction) {
    println!(
        "{:>5}  {}  {:>10.2}  {:<14}  {}",
        t.id,
        t.timestamp.format("%Y-%m-%d %H:%M"),
        t.amount,
        t.category,
        t.description
    );
}

pub fn run_search(source: &SourceArgs, query: &str, as_json: bool, cfg: &Config) -> Result<()> {
    let txns = load(source.file.as_deref(), cfg)?;
    let matched = select(&txns, source, query);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&matched)?);
        return Ok(());
    }

    for t in &matched {
        print_row(t);
    }
    println!(
        "\n{} of {} transactions | total {:.2}",
        matched.len(),
        txns.len(),
        total_spent(matched.iter().copied())
    );
    Ok(())
}

/// Row cap for a summary; 0, from the flag or the config, means no cap.
fn effective_limit(flag: Option<usize>, cfg: &Config) -> Option<usize> {
    let limit = flag.unwrap_or(cfg.summary.limit);
    (limit > 0).then_some(limit)
}

pub fn run_summary(source: &SourceArgs, opts: &SummaryOptions, cfg: &Config) -> Result<()> {
    let txns = load(source.file.as_deref(), cfg)?;
    let matched = select(&txns, source, opts.query.as_deref().unwrap_or(""));

    let group_by = opts.group_by.unwrap_or(cfg.summary.group_by);
    let rows = summarize(matched.iter().copied(), group_by, effective_limit(opts.limit, cfg));
    let total = total_spent(matched.iter().copied());

    if opts.json {
        let out = json!({
            "group_by": group_by,
            "total": total,
            "count": matched.len(),
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Spending by {} ({} transactions)\n", group_by, matched.len());
    for r in &rows {
        println!("{:<30} {:>12.2}  ({})", r.key, r.total, r.count);
    }
    println!("\nTotal: {:.2}", total);
    Ok(())
}

pub fn run_compare(file: Option<&Path>, opts: &CompareOptions, cfg: &Config) -> Result<()> {
    let txns = load(file, cfg)?;
    let cmp = compare_spending(&txns, opts.current, opts.previous, opts.category.as_deref());

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&cmp)?);
        return Ok(());
    }

    let scope = opts.category.as_deref().unwrap_or("all categories");
    println!("Spending, {scope}\n");
    for (label, p) in [("current", &cmp.current), ("previous", &cmp.previous)] {
        println!(
            "{:<9} {} .. {}  {:>12.2}",
            label, p.period.start, p.period.end, p.total
        );
    }
    println!(
        "\n{:?}: {:+.2} ({:+.1}%)",
        cmp.verdict, cmp.difference, cmp.percent_change
    );
    Ok(())
}

pub fn run_budget(file: Option<&Path>, month: NaiveDate, as_json: bool, cfg: &Config) -> Result<()> {
    if cfg.budgets.is_empty() {
        bail!("no budgets configured (add a [budgets] table to the config, e.g. Dining = 200.0)");
    }
    let txns = load(file, cfg)?;
    let lines = budget_status(&txns, month, &cfg.budgets);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    println!("Budgets for {}\n", month.format("%Y-%m"));
    for l in &lines {
        println!(
            "{:<20} {:>10.2} / {:>10.2}  {:>6.1}%  {}",
            l.category,
            l.spent,
            l.budget,
            l.percent_used,
            l.status.label()
        );
    }
    Ok(())
}

pub fn run_tokens(query: &str) -> Result<()> {
    let tokens = parse_query(query);
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

//! Output for the terminal. This is the display boundary: numbers are rounded
//! here and nowhere else.

use std::io::{self, Write};

use prothunter_catalog::{EnrichedProduct, LAST_UPDATE_FORMAT, Metric, round2};

const HEADER: [&str; 9] = [
    "id", "brand", "name", "price", "€/kg", "real €/kg", "real €/100g", "badge", "updated",
];

fn money(value: f64) -> String {
    format!("{:.2}", round2(value))
}

fn metric(value: Metric) -> String {
    match value.rounded() {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

/// Unparseable stamps show as missing rather than echoing the raw text.
fn updated(product: &EnrichedProduct) -> String {
    product
        .last_updated_at()
        .map(|at| at.format(LAST_UPDATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn row(product: &EnrichedProduct) -> [String; 9] {
    let weight_note = if product.weight_defaulted { "*" } else { "" };
    [
        product.id.to_string(),
        product.brand.clone(),
        product.name.clone(),
        money(product.price),
        format!("{}{weight_note}", money(product.price_per_kg)),
        metric(product.real_cost_per_kg),
        metric(product.real_price_per_100g()),
        product.badge().map(|b| b.label()).unwrap_or("").to_string(),
        updated(product),
    ]
}

/// Plain-text table. Columns are padded to their widest cell.
pub fn table<W: Write>(view: &[EnrichedProduct], out: &mut W) -> io::Result<()> {
    if view.is_empty() {
        writeln!(out, "no products match the current filters")?;
        return Ok(());
    }

    let rows: Vec<[String; 9]> = view.iter().map(row).collect();
    let mut widths = HEADER.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let header = HEADER.map(str::to_string);
    for cells in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{cell:<w$}", w = *w))
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }

    if view.iter().any(|p| p.weight_defaulted) {
        writeln!(out, "* weight missing in feed; 1 kg assumed")?;
    }
    Ok(())
}

/// The enriched records as a JSON array, unrounded.
pub fn json<W: Write>(view: &[EnrichedProduct], out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prothunter_catalog::{Catalog, RawProduct};

    fn catalog() -> Catalog {
        let feed: Vec<RawProduct> = serde_json::from_str(
            r#"[
                {
                    "id": 1, "name": "Impact Whey Protein", "brand": "MyProtein",
                    "price": 24.99, "weight_kg": 1.0, "protein_percent": 72,
                    "last_update": "18/10/2026 09:15"
                },
                {"id": 2, "name": "Creatine", "brand": "HSN", "price": 20, "last_update": "ayer"}
            ]"#,
        )
        .unwrap();
        Catalog::from_raw(feed)
    }

    #[test]
    fn table_rounds_at_the_boundary() {
        let mut out = Vec::new();
        table(catalog().products(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].ends_with("updated"));
        assert!(lines[1].contains("34.71"));
        assert!(lines[1].contains("3.47"));
        assert!(lines[1].contains("deal"));
        assert!(lines[1].ends_with("18/10/2026 09:15"));
        assert!(lines[2].contains("20.00*"));
        assert!(lines[2].contains(" - "));
        assert!(lines[2].ends_with(" -"));
        assert_eq!(lines[3], "* weight missing in feed; 1 kg assumed");
    }

    #[test]
    fn empty_view_prints_a_notice() {
        let mut out = Vec::new();
        table(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "no products match the current filters\n"
        );
    }

    #[test]
    fn json_keeps_unrounded_values() {
        let mut out = Vec::new();
        json(catalog().products(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let real = value[0]["real_cost_per_kg"].as_f64().unwrap();
        assert!((real - 24.99 / 0.72).abs() < 1e-9);
        assert!(value[1]["real_cost_per_kg"].is_null());
    }
}

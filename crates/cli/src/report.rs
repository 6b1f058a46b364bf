//! Plain-text load plan report.

use std::io::{self, Write};
use u_pallet::stack::{PackResult, ProductCatalog};

/// Writes the per-pallet layer tables followed by the order resume.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &PackResult,
    catalog: &ProductCatalog,
) -> io::Result<()> {
    for pallet in result.pallet_summaries() {
        writeln!(out, "Pallet {}", pallet.index + 1)?;
        writeln!(out, "{:=<72}", "")?;

        for layer in &pallet.layers {
            writeln!(
                out,
                "  Layer {} ({:?}, {:.1} cm, {:.1} kg)",
                layer.index + 1,
                layer.kind,
                layer.height,
                layer.weight
            )?;
            writeln!(
                out,
                "    {:<12} {:<28} {:>8} {:<6} {:>6}",
                "SKU", "Product", "Units", "Box", "Count"
            )?;
            for line in &layer.lines {
                let name = catalog
                    .product(&line.sku)
                    .map(|p| p.name.as_str())
                    .unwrap_or("");
                writeln!(
                    out,
                    "    {:<12} {:<28} {:>8} {:<6} {:>6}",
                    line.sku, name, line.units, line.variant, line.boxes
                )?;
            }
        }

        writeln!(
            out,
            "  {} units | {} boxes | {:.1} kg | {:.1} cm",
            pallet.units, pallet.boxes, pallet.gross_weight, pallet.height
        )?;
        writeln!(out)?;
    }

    if !result.issues.is_empty() {
        writeln!(out, "Skipped order lines")?;
        writeln!(out, "{:-<72}", "")?;
        for issue in &result.issues {
            writeln!(out, "  line {}: {}", issue.line_index + 1, issue.message())?;
        }
        writeln!(out)?;
    }

    let summary = result.summary();
    writeln!(out, "Order resume")?;
    writeln!(out, "{:-<72}", "")?;
    writeln!(out, "  Total pallets: {}", summary.pallets)?;
    writeln!(out, "  Total boxes:   {}", summary.boxes)?;
    writeln!(out, "  Total units:   {}", summary.units)?;
    writeln!(out, "  Total weight:  {:.1} kg", summary.total_weight)?;
    writeln!(out, "  Time:          {} ms", summary.time_ms)?;

    Ok(())
}

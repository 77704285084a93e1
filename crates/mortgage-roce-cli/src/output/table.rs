use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{comparison_rows, flatten, format_amount, lookup, result_of};

/// Columns of the ranked comparison table: (header, path in a result row).
const COMPARISON_COLUMNS: &[(&str, &str)] = &[
    ("Bank", "name"),
    ("Rate %", "annual_rate"),
    ("Years", "term_years"),
    ("Loan", "principal"),
    ("Down Payment", "capital_contributed"),
    ("Monthly Payment", "periodic_payment"),
    ("Monthly Fees", "periodic_fees"),
    ("Avg Interest", "interest.average"),
    ("Annual Principal", "annual_principal_equivalent"),
    ("Net Income", "roce.expected.net_income"),
    ("ROCE worst %", "roce.worst.ratio"),
    ("ROCE expected %", "roce.expected.ratio"),
    ("ROCE best %", "roce.best.ratio"),
    ("Lifetime Interest", "lifetime_interest"),
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(rows) = comparison_rows(value) {
        print_comparison(result_of(value), rows);
    } else {
        print_result_table(result_of(value));
    }
    print_envelope_notes(value);
}

fn print_comparison(report: &Value, rows: &[Value]) {
    for (label, key) in [
        ("Annual income", "annual_income"),
        ("Property price", "property_price"),
        ("Gross rental yield %", "gross_rental_yield"),
    ] {
        if let Some(v) = report.get(key) {
            println!("{}: {}", label, format_amount(v));
        }
    }

    if rows.is_empty() {
        println!("(no offers ranked)");
    } else {
        let mut builder = Builder::default();
        let mut headers = vec!["#".to_string()];
        headers.extend(COMPARISON_COLUMNS.iter().map(|(h, _)| h.to_string()));
        builder.push_record(headers);

        for (rank, row) in rows.iter().enumerate() {
            let mut record = vec![(rank + 1).to_string()];
            record.extend(COMPARISON_COLUMNS.iter().map(|(_, path)| {
                lookup(row, path).map(format_amount).unwrap_or_default()
            }));
            builder.push_record(record);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(Value::String(best)) = report.get("best_offer") {
        let roce = rows
            .first()
            .and_then(|r| lookup(r, "roce.expected.ratio"))
            .map(format_amount)
            .unwrap_or_default();
        println!(
            "\n{} {} (expected ROCE {}%)",
            "Best option:".green().bold(),
            best.as_str().bold(),
            roce
        );
    }

    if let Some(Value::Array(excluded)) = report.get("excluded") {
        if !excluded.is_empty() {
            println!("\nExcluded offers:");
            for ex in excluded {
                println!(
                    "  - {}: {}",
                    ex.get("name").map(format_amount).unwrap_or_default(),
                    ex.get("reason").map(format_amount).unwrap_or_default()
                );
            }
        }
    }
}

fn print_result_table(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", format_amount(result));
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        if key == "annual_interest" {
            continue;
        }
        builder.push_record([key, format_amount(&val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(years)) = map.get("annual_interest") {
        let mut builder = Builder::default();
        builder.push_record(["Year", "Interest"]);
        for (i, v) in years.iter().enumerate() {
            builder.push_record([(i + 1).to_string(), format_amount(v)]);
        }
        println!("\n{}", Table::from(builder));
    }
}

fn print_envelope_notes(value: &Value) {
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

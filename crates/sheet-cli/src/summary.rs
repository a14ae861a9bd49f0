use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheet_model::{Category, Diagnostic};
use sheet_validate::{Gate, HandledRows, SchemaIssue};

use sheet_cli::types::{CheckOutcome, SchemaOutcome};

/// Diagnostics listed individually before the table is cut short.
const MAX_LISTED_DIAGNOSTICS: usize = 50;

pub fn print_check_summary(outcome: &CheckOutcome) {
    println!("Input: {}", outcome.input.display());
    println!("Rows: {}", outcome.rows);
    println!("Column handling: {}", outcome.config.column_handling.label());
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }
    print_config_issues(&outcome.config_issues);
    print_gate_table(outcome);
    print_drift(outcome);
    if let Some(validation) = &outcome.report.validation {
        let counts = Category::all()
            .iter()
            .map(|category| (*category, validation.count(*category)))
            .collect();
        print_category_table(counts, validation.affected_rows());
        print_diagnostic_table(&validation.diagnostics);
    }
    if let Some(handled) = &outcome.handled {
        print_handling_table(handled);
    }
    println!();
    if outcome.is_importable() {
        println!("Result: ready to import");
    } else {
        println!("Result: import blocked");
    }
}

pub fn print_schema(outcome: &SchemaOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Rules"),
        header_cell("Format"),
        header_cell("On invalid"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for column in &outcome.config.columns {
        let rules: Vec<&str> = column
            .validation_rules
            .iter()
            .map(|rule| rule.rule_type().label())
            .collect();
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(column.label()),
            Cell::new(column.type_tag.label()),
            if column.required {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
            text_or_dash(&rules.join(", ")),
            text_or_dash(column.format.as_deref().unwrap_or_default()),
            Cell::new(column.invalid_handling.label()),
        ]);
    }
    println!("Columns: {}", outcome.config.columns.len());
    println!("Column handling: {}", outcome.config.column_handling.label());
    println!("{table}");
    print_config_issues(&outcome.issues);
}

fn print_config_issues(issues: &[SchemaIssue]) {
    if issues.is_empty() {
        return;
    }
    println!();
    println!("Configuration issues:");
    for issue in issues {
        println!("- {issue}");
    }
}

fn print_gate_table(outcome: &CheckOutcome) {
    let report = &outcome.report;
    let blocked = report.blocked_at();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Gate"),
        header_cell("Status"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);

    let headers = &report.headers;
    let mut header_details = Vec::new();
    if !headers.missing_required.is_empty() {
        header_details.push(format!("missing: {}", headers.missing_required.join(", ")));
    }
    if headers.has_unrecognized() {
        header_details.push(format!("unrecognized: {}", headers.unrecognized.join(", ")));
    }
    if !headers.duplicates.is_empty() {
        header_details.push(format!("duplicated: {}", headers.duplicates.join(", ")));
    }
    table.add_row(vec![
        Cell::new(Gate::Headers.label()),
        status_cell(Gate::Headers, blocked, true),
        details_cell(&header_details.join("; ")),
    ]);

    let drift_details = report.drift.as_ref().map_or(String::new(), |drift| {
        if drift.has_drift() {
            format!(
                "{} extra column(s), {}",
                drift.extra_columns.len(),
                drift.policy.label().to_lowercase()
            )
        } else {
            String::new()
        }
    });
    table.add_row(vec![
        Cell::new(Gate::SchemaDrift.label()),
        status_cell(Gate::SchemaDrift, blocked, report.drift.is_some()),
        details_cell(&drift_details),
    ]);

    let validation_details = report.validation.as_ref().map_or(String::new(), |validation| {
        if validation.valid {
            String::new()
        } else {
            format!(
                "{} issue(s) in {} row(s)",
                validation.diagnostics.len(),
                validation.affected_rows()
            )
        }
    });
    table.add_row(vec![
        Cell::new(Gate::Validation.label()),
        status_cell(Gate::Validation, blocked, report.validation.is_some()),
        details_cell(&validation_details),
    ]);
    println!("{table}");
}

fn print_drift(outcome: &CheckOutcome) {
    let Some(drift) = &outcome.report.drift else {
        return;
    };
    if !drift.needs_notice() {
        return;
    }
    let Some(report) = &drift.report else {
        return;
    };
    println!();
    println!("{}", report.message);
    for detail in &report.details {
        println!("- {detail}");
    }
}

fn print_category_table(counts: Vec<(Category, usize)>, affected_rows: usize) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Description"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total = 0usize;
    for (category, count) in counts {
        total += count;
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(category.description()),
            count_cell(Some(count), category_color(category)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{affected_rows} row(s) affected"))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(Some(total), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("{table}");
}

fn print_diagnostic_table(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Category"),
        header_cell("Value"),
        header_cell("Message"),
        header_cell("Suggestion"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for diagnostic in diagnostics.iter().take(MAX_LISTED_DIAGNOSTICS) {
        table.add_row(vec![
            Cell::new(diagnostic.row),
            Cell::new(&diagnostic.column),
            Cell::new(diagnostic.category.label()).fg(category_color(diagnostic.category)),
            text_or_dash(&diagnostic.value.to_string()),
            Cell::new(&diagnostic.message),
            text_or_dash(&diagnostic.suggestion),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
    let hidden = diagnostics.len().saturating_sub(MAX_LISTED_DIAGNOSTICS);
    if hidden > 0 {
        println!("... and {hidden} more (use --report for the full list)");
    }
}

fn print_handling_table(handled: &HandledRows) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Handling"), header_cell("Cells")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Flagged"),
        count_cell(Some(handled.flagged.len()), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Removed"),
        count_cell(Some(handled.removed.len()), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Defaulted"),
        count_cell(Some(handled.defaulted.len()), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rejected"),
        count_cell(Some(handled.rejected.len()), Color::Red),
    ]);
    println!();
    println!("{table}");
}

fn status_cell(gate: Gate, blocked: Option<Gate>, ran: bool) -> Cell {
    if blocked == Some(gate) {
        Cell::new("BLOCKED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if ran {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("skipped")
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Missing | Category::Invalid => Color::Red,
        Category::Format => Color::Yellow,
        Category::Other => Color::Magenta,
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn details_cell(details: &str) -> Cell {
    text_or_dash(details)
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

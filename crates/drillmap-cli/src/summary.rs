use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use drillmap_core::total;
use drillmap_model::{RegionPrefix, RenderFrame};

use drillmap_cli::types::{AggregateResult, InferResult, NavigateResult, StepOutcome};

pub fn print_inference(result: &InferResult) {
    println!("Data: {}", result.data.display());
    println!("Records: {}", result.records);
    if result.prefix.is_country() {
        println!("Common prefix: (none, country level)");
    } else {
        println!("Common prefix: {}", result.prefix);
    }
    println!("Depth: {}", result.depth);
    println!("Map code: {}", result.map_code);
}

pub fn print_aggregate(result: &AggregateResult) {
    println!("Scope: {}", scope_label(&result.prefix));
    print_frame(&result.frame);
}

pub fn print_navigation(result: &NavigateResult) {
    for report in &result.steps {
        let outcome = outcome_label(report.outcome);
        println!("> {}: {} [scope {}]", report.step, outcome, scope_label(&report.scope));
        if let Some(message) = &report.message {
            eprintln!("  {message}");
        }
        if let Some(frame) = &report.frame {
            print_frame(frame);
        }
    }
}

fn print_frame(frame: &RenderFrame) {
    println!("Map: {}", frame.map_code);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Drill prefix"),
        header_cell(if frame.series_name.is_empty() {
            "Value"
        } else {
            frame.series_name.as_str()
        }),
    ]);
    apply_frame_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for record in &frame.records {
        let name = if record.name.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&record.name)
        };
        let drill = if record.prefix.is_leaf() {
            dim_cell(&record.prefix)
        } else {
            Cell::new(&record.prefix)
        };
        table.add_row(vec![Cell::new(&record.code), name, drill, Cell::new(record.value)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(total(&frame.records)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Color scale: {} .. {}",
        frame.color_scale_min, frame.color_scale_max
    );
}

fn apply_frame_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn outcome_label(outcome: StepOutcome) -> String {
    match outcome {
        StepOutcome::Committed => outcome.label().to_string(),
        StepOutcome::Failed => format!("{} (scope unchanged)", outcome.label()),
        _ => format!("{} (nothing to do)", outcome.label()),
    }
}

fn scope_label(prefix: &RegionPrefix) -> String {
    if prefix.is_country() {
        "country".to_string()
    } else {
        prefix.to_string()
    }
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

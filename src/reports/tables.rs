use super::format::{format_count, format_optional, truncate_text};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keylens::dataset::{Dataset, KeywordRow, SuggestMetric};
use keylens::metrics::KeywordStats;
use keylens::scoring::ClusterSummary;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::Range<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn keyword_cell(row: &KeywordRow, width: usize) -> Cell {
    let cell = Cell::new(truncate_text(&row.keyword, width));
    if row.is_main_keyword {
        cell.add_attribute(Attribute::Bold).fg(Color::Cyan)
    } else {
        cell
    }
}

pub fn overview(main: &KeywordRow, width: usize) {
    println!("\n🔎 {}", truncate_text(&main.keyword, width));
    println!(
        "   Total {} | PC {} ({:.1}%) | Mobile {} ({:.1}%) | Competition {}",
        format_count(main.total_volume()),
        format_count(main.pc_volume),
        main.pc_ratio(),
        format_count(main.mobile_volume),
        main.mobile_ratio(),
        main.competition,
    );
}

pub fn keywords(dataset: &Dataset, width: usize) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Keyword").add_attribute(Attribute::Bold),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("PC"),
        Cell::new("Mobile"),
        Cell::new("PC %"),
        Cell::new("Clicks"),
        Cell::new("Competition"),
        Cell::new("Score").fg(Color::Green),
        Cell::new("Cluster"),
    ]);

    for (rank, row) in dataset.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            keyword_cell(row, width),
            Cell::new(format_count(row.total_volume())).fg(Color::Cyan),
            Cell::new(format_count(row.pc_volume)),
            Cell::new(format_count(row.mobile_volume)),
            Cell::new(format!("{:.1}", row.pc_ratio())),
            Cell::new(format_count(row.clicks)),
            Cell::new(&row.competition),
            Cell::new(format_optional(row.difficulty_score)).fg(Color::Green),
            Cell::new(format_optional(row.cluster_id)),
        ]);
    }

    align_right(&mut table, 2..7);
    align_right(&mut table, 8..10);
    println!("\n{}", table);
}

pub fn statistics(stats: &KeywordStats) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    for (label, value) in stats.summary_rows() {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }

    align_right(&mut table, 1..2);
    println!("\n📊 Statistics\n{}", table);
}

pub fn clusters(summaries: &[ClusterSummary]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Cluster").add_attribute(Attribute::Bold),
        Cell::new("Keywords"),
        Cell::new("Mean volume").fg(Color::Cyan),
        Cell::new("Mean competition"),
    ]);

    for s in summaries {
        table.add_row(vec![
            Cell::new(s.cluster_id),
            Cell::new(s.keywords),
            Cell::new(format_count(s.mean_volume.round() as u64)).fg(Color::Cyan),
            Cell::new(format!("{:.2}", s.mean_competition_weight)),
        ]);
    }

    align_right(&mut table, 1..4);
    println!("\n🧩 Clusters\n{}", table);
}

pub fn suggestions(rows: &[KeywordRow], metric: SuggestMetric, width: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Keyword").add_attribute(Attribute::Bold),
        Cell::new(metric.to_string()).fg(Color::Green),
        Cell::new("Total"),
        Cell::new("Competition"),
    ]);

    for (rank, row) in rows.iter().enumerate() {
        let value = match metric {
            SuggestMetric::DifficultyScore => format_optional(row.difficulty_score),
            _ => format_count(metric.value(row) as u64),
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            keyword_cell(row, width),
            Cell::new(value).fg(Color::Green),
            Cell::new(format_count(row.total_volume())),
            Cell::new(&row.competition),
        ]);
    }

    align_right(&mut table, 2..4);
    println!("\n💡 Suggested keywords by {}\n{}", metric, table);
}

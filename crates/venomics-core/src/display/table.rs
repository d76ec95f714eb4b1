use crate::api::models::{Alert, Dashboard, DataSource, Query, Row, User};
use crate::utils::text::{format_date, single_line, truncate_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;
use serde_json::Value;

struct ColumnWidths {
    name: usize,
    detail: usize,
}

pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str], color: Color) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        let cells: Vec<Cell> = headers.iter().map(|h| self.bold_header(h, color)).collect();
        table.set_header(cells);
        table
    }

    pub fn render_query_list(&self, queries: &[Query]) -> String {
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(
            &["ID", "Name", "Tags", "Scheduled", "Updated"],
            Color::Cyan,
        );

        for query in queries {
            let scheduled = if query.is_scheduled() { "yes" } else { "no" };
            table.add_row(vec![
                self.colored_cell(&query.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(&query.name, widths.name)),
                Cell::new(truncate_text(&query.tags.join(", "), widths.detail)),
                Cell::new(scheduled),
                self.colored_cell(&format_date(query.updated_time().as_ref()), Color::DarkGrey),
            ]);
        }

        table.to_string()
    }

    /// Metadata block followed by the query text.
    pub fn render_query_detail(&self, query: &Query) -> String {
        let mut table = self.new_table(&["Field", "Value"], Color::Cyan);
        let author = query.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
        let rows = [
            ("ID", query.id.to_string()),
            ("Name", query.name.clone()),
            ("Description", query.description.clone().unwrap_or_default()),
            ("Tags", query.tags.join(", ")),
            (
                "Data source",
                query.data_source_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            ("Created by", author),
            ("Scheduled", query.is_scheduled().to_string()),
            ("Favorite", query.is_favorite.to_string()),
            ("Updated", format_date(query.updated_time().as_ref())),
        ];
        for (field, value) in rows {
            table.add_row(vec![self.bold_header(field, Color::Green), Cell::new(value)]);
        }

        format!("{}\n\n{}", table, query.query_text)
    }

    pub fn render_dashboard_list(&self, dashboards: &[Dashboard]) -> String {
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Slug", "Name", "Tags"], Color::Cyan);

        for dashboard in dashboards {
            table.add_row(vec![
                self.colored_cell(&dashboard.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(&dashboard.slug, widths.name)),
                Cell::new(truncate_text(&dashboard.name, widths.name)),
                Cell::new(truncate_text(&dashboard.tags.join(", "), widths.detail)),
            ]);
        }

        table.to_string()
    }

    pub fn render_alert_list(&self, alerts: &[Alert]) -> String {
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Name", "State", "Query"], Color::Cyan);

        for alert in alerts {
            let query = alert
                .query
                .as_ref()
                .map(|q| format!("#{} {}", q.id, q.name))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![
                self.colored_cell(&alert.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(&alert.name, widths.name)),
                Cell::new(alert.state.as_deref().unwrap_or("-")),
                Cell::new(truncate_text(&query, widths.detail)),
            ]);
        }

        table.to_string()
    }

    pub fn render_user_list(&self, users: &[User]) -> String {
        let mut table = self.new_table(&["ID", "Name", "Email", "Disabled"], Color::Cyan);

        for user in users {
            let disabled = if user.is_disabled {
                self.colored_cell("yes", Color::Yellow)
            } else {
                Cell::new("no")
            };
            table.add_row(vec![
                self.colored_cell(&user.id.to_string(), Color::Cyan),
                Cell::new(&user.name),
                Cell::new(user.email.as_deref().unwrap_or("-")),
                disabled,
            ]);
        }

        table.to_string()
    }

    pub fn render_data_source_list(&self, data_sources: &[DataSource]) -> String {
        let mut table = self.new_table(&["ID", "Name", "Type", "Syntax"], Color::Cyan);

        for source in data_sources {
            table.add_row(vec![
                self.colored_cell(&source.id.to_string(), Color::Cyan),
                Cell::new(&source.name),
                Cell::new(&source.kind),
                Cell::new(source.syntax.as_deref().unwrap_or("-")),
            ]);
        }

        table.to_string()
    }

    /// Result rows; columns follow the first row's key order.
    pub fn render_rows(&self, rows: &[Row]) -> String {
        let Some(first) = rows.first() else {
            return "Query returned no results.".to_string();
        };
        let columns: Vec<&str> = first.keys().map(String::as_str).collect();
        let mut table = self.new_table(&columns, Color::Green);

        for row in rows {
            let cells: Vec<Cell> = columns
                .iter()
                .map(|column| {
                    let value = row.get(*column).unwrap_or(&Value::Null);
                    let formatted = self.format_cell_value(value);
                    if self.use_colors && value.is_null() {
                        Cell::new(formatted)
                            .fg(Color::DarkGrey)
                            .add_attribute(Attribute::Italic)
                    } else {
                        Cell::new(formatted)
                    }
                })
                .collect();
            table.add_row(cells);
        }

        format!("{}\n{} rows", table, rows.len())
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = self
            .max_width
            .map(|w| if w > 20 { w - 6 } else { w.max(40) })
            .unwrap_or(80);
        table.set_width(width as u16);
    }

    fn get_responsive_column_widths(&self) -> ColumnWidths {
        match self.max_width.unwrap_or(80) {
            0..=59 => ColumnWidths { name: 12, detail: 12 },
            60..=79 => ColumnWidths { name: 18, detail: 16 },
            80..=119 => ColumnWidths { name: 30, detail: 24 },
            _ => ColumnWidths { name: 48, detail: 36 },
        }
    }

    pub fn format_cell_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "-".to_string(),
            Value::String(s) => truncate_text(&single_line(s), 100),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            Value::Array(arr) => format!("[{} items]", arr.len()),
            Value::Object(obj) if obj.is_empty() => "{}".to_string(),
            Value::Object(obj) => format!("{{{} items}}", obj.len()),
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn display() -> TableDisplay {
        TableDisplay::new().with_max_width(120).with_colors(false)
    }

    #[test]
    fn test_format_cell_value() {
        let display = display();
        assert_eq!(display.format_cell_value(&Value::Null), "-");
        assert_eq!(display.format_cell_value(&json!(42)), "42");
        assert_eq!(display.format_cell_value(&json!("a\nb")), "a b");
        assert_eq!(display.format_cell_value(&json!([1, 2])), "[2 items]");
        assert_eq!(display.format_cell_value(&json!({})), "{}");
    }

    #[test]
    fn test_render_query_list_contains_names() {
        let queries: Vec<Query> = serde_json::from_value(json!([
            {"id": 1, "name": "Signups", "query": "select 1", "tags": ["growth"]},
            {"id": 2, "name": "Churn", "query": "select 2", "schedule": {"interval": 3600}}
        ]))
        .unwrap();

        let output = display().render_query_list(&queries);
        assert!(output.contains("Signups"));
        assert!(output.contains("growth"));
        assert!(output.contains("Churn"));
        assert!(output.contains("yes"));
    }

    #[test]
    fn test_render_rows_keeps_column_order() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            {"country": "NL", "total": 10},
            {"country": "BE", "total": null}
        ]))
        .unwrap();

        let output = display().render_rows(&rows);
        let country = output.find("country").unwrap();
        let total = output.find("total").unwrap();
        assert!(country < total);
        assert!(output.contains("BE"));
        assert!(output.ends_with("2 rows"));
    }

    #[test]
    fn test_render_rows_empty() {
        assert_eq!(display().render_rows(&[]), "Query returned no results.");
    }

    #[test]
    fn test_render_user_list() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": 3, "name": "Ada", "email": "ada@example.test", "is_disabled": true}
        ]))
        .unwrap();

        let output = display().render_user_list(&users);
        assert!(output.contains("ada@example.test"));
        assert!(output.contains("yes"));
    }
}

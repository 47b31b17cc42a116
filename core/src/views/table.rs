//! Plain-text table renderer.

/// Column-aligned text table. Widths are measured in chars, so accented
/// titles line up.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    empty_message: Option<String>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            empty_message: None,
        }
    }

    /// Line printed in place of the body when there are no rows.
    pub fn empty_message(mut self, message: &str) -> Self {
        self.empty_message = Some(message.to_string());
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }

        let mut out = String::new();
        out.push_str(&render_line(&self.headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format!("{}\n", rule.join("-+-")));

        if self.rows.is_empty() {
            if let Some(message) = &self.empty_message {
                out.push_str(&format!("{message}\n"));
            }
        }
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_by_char_count() {
        let mut table = Table::new(["ID", "Título"]);
        table.push_row(vec!["1".to_string(), "Cien años".to_string()]);
        table.push_row(vec!["10".to_string(), "Ñu".to_string()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID | Título");
        assert_eq!(lines[2], "1  | Cien años");
        assert_eq!(lines[3], "10 | Ñu");
    }

    #[test]
    fn empty_table_prints_message() {
        let table = Table::new(["ID"]).empty_message("No hay libros registrados");
        assert!(table.render().ends_with("No hay libros registrados\n"));
    }
}

use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Print `rows` as left-aligned columns under `headers`, two spaces apart.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let widths = column_widths(headers, &rows);
    println!("{}", format_row(headers.iter().copied(), &widths));

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        println!("{}", format_row(row.iter().map(String::as_str), &widths));
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| {
            let w = widths.get(i).copied().unwrap_or(0);
            format!("{cell:w$}")
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_cover_longest_cell() {
        let rows = vec![vec!["Release-10".to_string(), "-".to_string()]];
        assert_eq!(column_widths(&["RELEASE", "PROJECT"], &rows), [10, 7]);
    }

    #[test]
    fn rows_are_padded_and_trimmed() {
        let line = format_row(["a", "b"].into_iter(), &[3, 3]);
        assert_eq!(line, "a    b");
    }
}

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Tabular data read from a CSV file.
///
/// The format is deliberately plain: the first line is the header row, the
/// first column holds row labels, cells are comma-separated and trimmed.
/// Blank lines are skipped. Quoting and escaping are not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads and parses the CSV file at the given path.
    pub fn from_path(path: &Path) -> Result<Table> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read csv file '{}'", path.display()))?;
        Self::parse(&text)
    }

    /// Parses CSV text into a table.
    ///
    /// Every row must have exactly as many cells as the header; at least one
    /// data row must be present.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_studio::table::Table;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let table = Table::parse("month,sales\njan,10\nfeb,12")?;
    /// assert_eq!(table.numeric_column("sales")?, vec![10.0, 12.0]);
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn parse(text: &str) -> Result<Table> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header_line = lines.next().context("csv input is empty")?;
        let headers = split_row(header_line);

        let mut rows = Vec::new();
        for (index, line) in lines.enumerate() {
            let cells = split_row(line);
            if cells.len() != headers.len() {
                bail!(
                    "data row {} has {} cell{} but the header has {} column{}",
                    index + 1,
                    cells.len(),
                    if cells.len() == 1 { "" } else { "s" },
                    headers.len(),
                    if headers.len() == 1 { "" } else { "s" }
                );
            }
            rows.push(cells);
        }
        if rows.is_empty() {
            bail!("csv has no data rows");
        }

        Ok(Table { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row labels: the first column, top to bottom.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row[0].clone()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// The named column parsed as numbers, top to bottom.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self
            .column_index(name)
            .with_context(|| format!("csv has no column named '{}'", name))?;
        self.numeric_column_at(index, name)
    }

    /// Every column after the label column, parsed as numbers.
    pub fn series(&self) -> Result<Vec<(String, Vec<f64>)>> {
        if self.headers.len() < 2 {
            bail!("csv needs a label column and at least one value column");
        }
        self.headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, header)| Ok((header.clone(), self.numeric_column_at(index, header)?)))
            .collect()
    }

    fn numeric_column_at(&self, index: usize, name: &str) -> Result<Vec<f64>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                row[index].parse::<f64>().with_context(|| {
                    format!(
                        "cell '{}' in data row {} of column '{}' is not numeric",
                        row[index],
                        row_index + 1,
                        name
                    )
                })
            })
            .collect()
    }
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SALES: &str = "month,sales,costs\njan,10,4\nfeb,12,5\nmar,9,3";

    #[test]
    fn parse_reads_headers_and_rows() {
        let table = Table::parse(SALES).unwrap();

        assert_eq!(table.headers(), ["month", "sales", "costs"]);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn labels_come_from_the_first_column() {
        let table = Table::parse(SALES).unwrap();
        assert_eq!(table.labels(), vec!["jan", "feb", "mar"]);
    }

    #[test]
    fn blank_lines_and_padding_are_tolerated() {
        let table = Table::parse("a, b\n\n  1 , 2  \n\n").unwrap();

        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.numeric_column("b").unwrap(), vec![2.0]);
    }

    #[test]
    fn numeric_column_parses_values() {
        let table = Table::parse(SALES).unwrap();
        assert_eq!(
            table.numeric_column("sales").unwrap(),
            vec![10.0, 12.0, 9.0]
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = Table::parse(SALES).unwrap();
        let error = table.numeric_column("profit").unwrap_err();
        assert_eq!(error.to_string(), "csv has no column named 'profit'");
    }

    #[test]
    fn non_numeric_cell_is_an_error() {
        let table = Table::parse("label,value\nrow,n/a").unwrap();
        let error = table.numeric_column("value").unwrap_err();
        assert_eq!(
            error.to_string(),
            "cell 'n/a' in data row 1 of column 'value' is not numeric"
        );
    }

    #[test]
    fn series_returns_every_value_column() {
        let table = Table::parse(SALES).unwrap();

        let series = table.series().unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, "sales");
        assert_eq!(series[0].1, vec![10.0, 12.0, 9.0]);
        assert_eq!(series[1].0, "costs");
        assert_eq!(series[1].1, vec![4.0, 5.0, 3.0]);
    }

    #[test]
    fn single_column_csv_cannot_be_charted() {
        let table = Table::parse("values\n3\n4").unwrap();
        let error = table.series().unwrap_err();
        assert_eq!(
            error.to_string(),
            "csv needs a label column and at least one value column"
        );
    }

    #[test]
    fn ragged_row_is_an_error() {
        let error = Table::parse("a,b\n1,2\n3").unwrap_err();
        assert_eq!(
            error.to_string(),
            "data row 2 has 1 cell but the header has 2 columns"
        );
    }

    #[test]
    fn overlong_row_is_an_error() {
        let error = Table::parse("a\n1,2").unwrap_err();
        assert_eq!(
            error.to_string(),
            "data row 1 has 2 cells but the header has 1 column"
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        let error = Table::parse("  \n ").unwrap_err();
        assert_eq!(error.to_string(), "csv input is empty");
    }

    #[test]
    fn header_without_rows_is_an_error() {
        let error = Table::parse("a,b\n").unwrap_err();
        assert_eq!(error.to_string(), "csv has no data rows");
    }
}

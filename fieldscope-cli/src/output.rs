use anyhow::Result;
use fieldscope::{QueryResponse, QueryResult, TableResult};

/// Render a query response for the terminal, or as pretty JSON.
pub fn render(response: &QueryResponse, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(response)?);
    }

    let mut out = String::new();
    for result in response.results.values() {
        match result {
            QueryResult::Table(table) => out.push_str(&render_table(table)),
            QueryResult::Error(error) => {
                out.push_str(&format!("error [{}]: {}\n", error.ref_id, error.message))
            }
        }
    }
    Ok(out)
}

/// `true` if any result is an error
pub fn has_errors(response: &QueryResponse) -> bool {
    response
        .results
        .values()
        .any(|r| matches!(r, QueryResult::Error(_)))
}

fn render_table(table: &TableResult) -> String {
    let name_header = table.columns.first().map(String::as_str).unwrap_or("name");
    let type_header = table.columns.get(1).map(String::as_str).unwrap_or("type");
    let width = table
        .rows
        .iter()
        .map(|(name, _)| name.len())
        .fold(name_header.len(), usize::max);

    let mut out = format!("{:<width$}  {}\n", name_header, type_header, width = width);
    for (name, field_type) in &table.rows {
        out.push_str(&format!("{:<width$}  {}\n", name, field_type, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldscope::ErrorResult;
    use serde_json::json;

    #[test]
    fn test_render_table() {
        let mut table = TableResult::new("A");
        table.push_row("host", "text");
        table.push_row("metrics.cpu", "float");
        let response = QueryResponse::single(QueryResult::Table(table));

        assert_eq!(
            render(&response, false).unwrap(),
            "name         type\nhost         text\nmetrics.cpu  float\n"
        );
        assert!(!has_errors(&response));
    }

    #[test]
    fn test_render_empty_table() {
        let response = QueryResponse::single(QueryResult::Table(TableResult::new("A")));
        assert_eq!(render(&response, false).unwrap(), "name  type\n");
    }

    #[test]
    fn test_render_error() {
        let response = QueryResponse::single(QueryResult::Error(ErrorResult::from_payload(
            "A",
            json!("index_not_found_exception"),
        )));
        assert_eq!(
            render(&response, false).unwrap(),
            "error [A]: index_not_found_exception\n"
        );
        assert!(has_errors(&response));
    }

    #[test]
    fn test_render_json() {
        let response = QueryResponse::single(QueryResult::Table(TableResult::new("A")));
        let value: serde_json::Value =
            serde_json::from_str(&render(&response, true).unwrap()).unwrap();
        assert_eq!(value["results"]["A"]["kind"], "table");
    }
}

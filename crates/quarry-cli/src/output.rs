use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable value on stdout.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Counts {
        inserted: usize,
    }

    #[test]
    fn raw_is_single_line() {
        let rendered = render(&Counts { inserted: 3 }, OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"inserted":3}"#);
    }

    #[test]
    fn json_is_pretty() {
        let rendered = render(&Counts { inserted: 3 }, OutputFormat::Json).unwrap();
        assert_eq!(rendered, "{\n  \"inserted\": 3\n}");
    }
}

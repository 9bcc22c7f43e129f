use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::view::{SortDirection, SortKey};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.data.is_some() && args.url.is_some() {
        return Err("use either --data or --url, not both".to_string());
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, expected positive integer".to_string());
        }
    }
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.sort.as_deref() {
        SortKey::parse(raw).ok_or_else(|| {
            format!("invalid --sort '{raw}', expected name, rating, reviews or category")
        })?;
    }
    if let Some(raw) = args.direction.as_deref() {
        SortDirection::parse(raw)
            .ok_or_else(|| format!("invalid --direction '{raw}', expected asc or desc"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --output-format '{raw}', expected text, json or html"))?;
    }
    Ok(())
}

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::Lead;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a user-facing notice (aborted action, failed login) in the appropriate format
pub fn output_notice(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("{}", message);
        }
    }
    Ok(())
}

/// Print one page of leads with their continuous row numbers
pub fn output_lead_page(
    output_format: &OutputFormat,
    rows: &[(usize, &Lead)],
    page: usize,
    page_count: usize,
    total: usize,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let leads: Vec<Value> = rows
                .iter()
                .map(|(number, lead)| {
                    json!({
                        "number": number,
                        "name": lead.name,
                        "phone": lead.mobile,
                        "email": lead.email,
                        "model": lead.model,
                        "date": lead.created_at.format("%Y-%m-%d").to_string(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "page": page,
                    "page_count": page_count,
                    "total": total,
                    "leads": leads
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{:>5}  {:<24} {:<15} {:<30} {:<12} {}", "ID", "Name", "Phone", "Email", "Model", "Date");
            for (number, lead) in rows {
                println!(
                    "{:>5}  {:<24} {:<15} {:<30} {:<12} {}",
                    number,
                    lead.name,
                    lead.mobile,
                    lead.email,
                    lead.model,
                    lead.created_at.format("%Y-%m-%d")
                );
            }
            println!("Page {} of {} ({} leads)", page, page_count, total);
        }
    }
    Ok(())
}

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash, short_timestamp, truncate_with_ellipsis};
use crate::db::{Contact, ContactQuery, ContactRepository, ContactStatus, Database};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub(crate) struct ContactDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Phone")]
    pub(crate) phone: String,
    #[tabled(rename = "Message")]
    pub(crate) message: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
    #[tabled(rename = "Received")]
    pub(crate) created_at: String,
}

impl From<&Contact> for ContactDisplay {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: truncate_with_ellipsis(&contact.name, 30),
            email: contact.email.clone(),
            phone: or_dash(contact.phone.as_deref()),
            message: truncate_with_ellipsis(&contact.message, 40),
            status: contact.status.to_string(),
            created_at: short_timestamp(&contact.created_at),
        }
    }
}

fn parse_status(status: &str) -> CliResult<ContactStatus> {
    status.parse().map_err(|_| {
        CliError::invalid_argument(format!(
            "unknown status '{}', expected one of: new, in_progress, completed, archived",
            status
        ))
    })
}

/// List contact requests, newest first
pub async fn list_contacts<D: Database>(
    db: &D,
    status: Option<&str>,
    format: &str,
) -> CliResult<String> {
    let query = ContactQuery {
        status: status.map(parse_status).transpose()?,
    };
    let contacts = db.contacts().list(&query).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&contacts)?),
        _ => Ok(format_table(&contacts)),
    }
}

pub(crate) fn format_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.".to_string();
    }

    let display: Vec<ContactDisplay> = contacts.iter().map(|c| c.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Move a contact request to another status
pub async fn set_status<D: Database>(db: &D, id: &str, status: &str) -> CliResult<String> {
    let status = parse_status(status)?;
    let contact = db.contacts().set_status(id, status).await?;
    Ok(format!(
        "✓ Contact {} ({}) is now {}",
        contact.id, contact.name, contact.status
    ))
}

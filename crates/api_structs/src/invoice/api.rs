use crate::dtos::InvoiceDTO;
use dealbird_domain::{Invoice, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub invoice: InvoiceDTO,
}

impl InvoiceResponse {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            invoice: InvoiceDTO::new(invoice),
        }
    }
}

pub mod get_invoice {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    pub type APIResponse = InvoiceResponse;
}

pub mod get_invoices {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub invoices: Vec<InvoiceDTO>,
    }

    impl APIResponse {
        pub fn new(invoices: Vec<Invoice>) -> Self {
            Self {
                invoices: invoices.into_iter().map(InvoiceDTO::new).collect(),
            }
        }
    }
}

pub mod mark_invoice_paid {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub invoice_id: ID,
    }

    pub type APIResponse = InvoiceResponse;
}

pub mod send_invoice_reminders {
    use crate::dtos::InvoiceReminderDTO;
    use serde::Serialize;

    /// Payload POSTed to an account's webhook for one reminder cycle.
    #[derive(Debug, Serialize, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct AccountRemindersDTO {
        pub reminders: Vec<InvoiceReminderDTO>,
    }

    impl AccountRemindersDTO {
        pub fn new(reminders: Vec<InvoiceReminderDTO>) -> Self {
            Self { reminders }
        }
    }
}

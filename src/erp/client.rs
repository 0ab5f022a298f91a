use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpCustomer {
    pub code: String,
    pub name: String,
    pub nip: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub payment_terms: String,
    pub credit_limit: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpOrderItem {
    pub product_code: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
    pub price_net: f64,
    pub total_net: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpOrder {
    pub order_id: String,
    pub order_number: String,
    pub order_date: String,
    pub customer_code: String,
    pub customer_name: String,
    pub total_net: f64,
    pub total_gross: f64,
    pub currency: String,
    pub status: String,
    pub delivery_date: String,
    pub items: Vec<ErpOrderItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpInvoiceItem {
    pub product_code: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
    pub price_net: f64,
    pub vat_rate: i64,
    pub total_net: f64,
    pub total_gross: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpInvoice {
    pub invoice_id: String,
    pub invoice_number: String,
    pub invoice_type: String,
    pub invoice_date: String,
    pub sale_date: String,
    pub due_date: String,
    pub customer_code: String,
    pub customer_name: String,
    pub total_net: f64,
    pub total_gross: f64,
    pub currency: String,
    pub payment_status: String,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub items: Vec<ErpInvoiceItem>,
}

impl ErpInvoice {
    pub fn is_unpaid(&self) -> bool {
        self.payment_status == "unpaid" || self.payment_status == "partial"
    }

    /// Dates come over the wire as ISO-8601 strings, so lexicographic
    /// comparison against today's date is enough.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_unpaid()
            && !self.due_date.is_empty()
            && self.due_date < today.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpDeliveryItem {
    pub product_code: String,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpDeliveryNote {
    pub document_id: String,
    pub document_number: String,
    pub document_type: String,
    pub document_date: String,
    pub customer_code: String,
    pub customer_name: String,
    pub related_invoice: String,
    pub related_order: String,
    pub items: Vec<ErpDeliveryItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpPayment {
    pub payment_id: String,
    pub payment_date: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub related_invoice: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErpCustomerSummary {
    pub total_orders: usize,
    pub total_orders_value: f64,
    pub total_invoices: usize,
    pub total_invoices_value: f64,
    pub unpaid_invoices: usize,
    pub unpaid_amount: f64,
    pub overdue_invoices: usize,
    pub overdue_amount: f64,
    pub last_order_date: String,
    pub last_invoice_date: String,
}

/// Read-only view onto an external ERP system. Transport failures are
/// swallowed by implementations: a customer lookup degrades to `None`,
/// document lists degrade to empty.
#[async_trait]
pub trait ErpClient: Send + Sync {
    async fn get_customer(&self, customer_code: &str) -> Option<ErpCustomer>;

    async fn search_customers(&self, query: &str, limit: usize) -> Vec<ErpCustomer>;

    async fn get_customer_orders(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpOrder>;

    async fn get_order_detail(&self, order_id: &str) -> Option<ErpOrder>;

    async fn get_customer_invoices(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpInvoice>;

    async fn get_invoice_detail(&self, invoice_id: &str) -> Option<ErpInvoice>;

    async fn get_customer_delivery_notes(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpDeliveryNote>;

    async fn get_customer_payments(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpPayment>;

    async fn test_connection(&self) -> bool;

    /// Aggregated over orders and invoices, so it works against any
    /// backend that can list documents.
    async fn get_customer_summary(
        &self,
        customer_code: &str,
        today: NaiveDate,
    ) -> ErpCustomerSummary {
        let orders = self.get_customer_orders(customer_code, None, None, 1000).await;
        let invoices = self
            .get_customer_invoices(customer_code, None, None, 1000)
            .await;
        summarize(&orders, &invoices, today)
    }
}

pub fn summarize(
    orders: &[ErpOrder],
    invoices: &[ErpInvoice],
    today: NaiveDate,
) -> ErpCustomerSummary {
    let unpaid: Vec<&ErpInvoice> = invoices.iter().filter(|i| i.is_unpaid()).collect();
    let overdue: Vec<&&ErpInvoice> = unpaid.iter().filter(|i| i.is_overdue(today)).collect();

    ErpCustomerSummary {
        total_orders: orders.len(),
        total_orders_value: orders.iter().map(|o| o.total_gross).sum(),
        total_invoices: invoices.len(),
        total_invoices_value: invoices.iter().map(|i| i.total_gross).sum(),
        unpaid_invoices: unpaid.len(),
        unpaid_amount: unpaid.iter().map(|i| i.remaining_amount).sum(),
        overdue_invoices: overdue.len(),
        overdue_amount: overdue.iter().map(|i| i.remaining_amount).sum(),
        last_order_date: orders
            .iter()
            .map(|o| o.order_date.clone())
            .max()
            .unwrap_or_default(),
        last_invoice_date: invoices
            .iter()
            .map(|i| i.invoice_date.clone())
            .max()
            .unwrap_or_default(),
    }
}

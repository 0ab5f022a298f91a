use super::client::*;
use crate::shared::config::ErpConfig;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Client for the Comarch ERP XL REST API. The upstream speaks Polish
/// field names; everything is translated at this boundary.
pub struct ComarchClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ComarchClient {
    pub fn from_config(config: &ErpConfig) -> Option<Self> {
        let base_url = config.base_url.clone()?;
        if base_url.is_empty() {
            return None;
        }
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
        {
            Ok(http) => http,
            Err(err) => {
                warn!("could not build ERP http client: {err}");
                return None;
            }
        };
        Some(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_json(&self, path: &str) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut request = self.http.get(&url).header("Accept", "application/json");
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("ERP request to {url} failed: {err}");
                return None;
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                warn!("ERP request to {url} returned an error status: {err}");
                return None;
            }
        };
        match response.json::<Value>().await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ERP response from {url} is not valid JSON: {err}");
                None
            }
        }
    }
}

#[async_trait]
impl ErpClient for ComarchClient {
    async fn get_customer(&self, customer_code: &str) -> Option<ErpCustomer> {
        let data = self.get_json(&format!("customers/{customer_code}")).await?;
        Some(map_customer(customer_code, &data))
    }

    async fn search_customers(&self, query: &str, limit: usize) -> Vec<ErpCustomer> {
        let path = format!("customers?search={query}&limit={limit}");
        let Some(data) = self.get_json(&path).await else {
            return Vec::new();
        };
        records_of(&data)
            .iter()
            .take(limit)
            .map(|item| map_customer(&text(item, "Kod"), item))
            .collect()
    }

    async fn get_customer_orders(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpOrder> {
        let path = list_path(
            &format!("customers/{customer_code}/orders"),
            date_from,
            date_to,
            limit,
        );
        let Some(data) = self.get_json(&path).await else {
            return Vec::new();
        };
        records_of(&data)
            .iter()
            .take(limit)
            .map(|item| map_order(customer_code, item))
            .collect()
    }

    async fn get_order_detail(&self, order_id: &str) -> Option<ErpOrder> {
        let data = self.get_json(&format!("orders/{order_id}")).await?;
        let customer_code = text(&data, "KodKontrahenta");
        Some(map_order(&customer_code, &data))
    }

    async fn get_customer_invoices(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpInvoice> {
        let path = list_path(
            &format!("customers/{customer_code}/invoices"),
            date_from,
            date_to,
            limit,
        );
        let Some(data) = self.get_json(&path).await else {
            return Vec::new();
        };
        records_of(&data)
            .iter()
            .take(limit)
            .map(|item| map_invoice(customer_code, item))
            .collect()
    }

    async fn get_invoice_detail(&self, invoice_id: &str) -> Option<ErpInvoice> {
        let data = self.get_json(&format!("invoices/{invoice_id}")).await?;
        let customer_code = text(&data, "KodKontrahenta");
        Some(map_invoice(&customer_code, &data))
    }

    async fn get_customer_delivery_notes(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpDeliveryNote> {
        let path = list_path(
            &format!("customers/{customer_code}/delivery-notes"),
            date_from,
            date_to,
            limit,
        );
        let Some(data) = self.get_json(&path).await else {
            return Vec::new();
        };
        records_of(&data)
            .iter()
            .take(limit)
            .map(|item| map_delivery_note(customer_code, item))
            .collect()
    }

    async fn get_customer_payments(
        &self,
        customer_code: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> Vec<ErpPayment> {
        let path = list_path(
            &format!("customers/{customer_code}/payments"),
            date_from,
            date_to,
            limit,
        );
        let Some(data) = self.get_json(&path).await else {
            return Vec::new();
        };
        records_of(&data)
            .iter()
            .take(limit)
            .map(map_payment)
            .collect()
    }

    async fn test_connection(&self) -> bool {
        self.get_json("customers?limit=1").await.is_some()
    }
}

fn list_path(
    base: &str,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    limit: usize,
) -> String {
    let mut path = format!("{base}?limit={limit}");
    if let Some(date) = date_from {
        path.push_str(&format!("&date_from={date}"));
    }
    if let Some(date) = date_to {
        path.push_str(&format!("&date_to={date}"));
    }
    path
}

/// Comarch wraps collections either as a bare array or under "results".
pub fn records_of(data: &Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn text(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn text_or(item: &Value, key: &str, default: &str) -> String {
    match item.get(key).and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => default.to_string(),
    }
}

fn number(item: &Value, key: &str) -> f64 {
    item.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn map_customer(customer_code: &str, item: &Value) -> ErpCustomer {
    ErpCustomer {
        code: text_or(item, "Kod", customer_code),
        name: text(item, "Nazwa"),
        nip: text(item, "NIP"),
        address: text(item, "Adres"),
        email: text(item, "Email"),
        phone: text(item, "Telefon"),
        payment_terms: text(item, "TerminPlatnosci"),
        credit_limit: number(item, "LimitKredytowy"),
        balance: number(item, "Saldo"),
    }
}

pub fn map_order(customer_code: &str, item: &Value) -> ErpOrder {
    ErpOrder {
        order_id: text(item, "Id"),
        order_number: text(item, "Numer"),
        order_date: text(item, "DataZamowienia"),
        customer_code: customer_code.to_string(),
        customer_name: text(item, "NazwaKontrahenta"),
        total_net: number(item, "WartoscNetto"),
        total_gross: number(item, "WartoscBrutto"),
        currency: text_or(item, "Waluta", "PLN"),
        status: text_or(item, "Status", "unknown"),
        delivery_date: text(item, "DataRealizacji"),
        items: item
            .get("Pozycje")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(map_order_item).collect())
            .unwrap_or_default(),
    }
}

fn map_order_item(item: &Value) -> ErpOrderItem {
    ErpOrderItem {
        product_code: text(item, "KodTowaru"),
        product_name: text(item, "NazwaTowaru"),
        quantity: number(item, "Ilosc"),
        unit: text_or(item, "Jednostka", "szt"),
        price_net: number(item, "CenaNetto"),
        total_net: number(item, "WartoscNetto"),
    }
}

pub fn map_invoice(customer_code: &str, item: &Value) -> ErpInvoice {
    ErpInvoice {
        invoice_id: text(item, "Id"),
        invoice_number: text(item, "Numer"),
        invoice_type: text_or(item, "TypDokumentu", "FS"),
        invoice_date: text(item, "DataWystawienia"),
        sale_date: text(item, "DataSprzedazy"),
        due_date: text(item, "TerminPlatnosci"),
        customer_code: customer_code.to_string(),
        customer_name: text(item, "NazwaKontrahenta"),
        total_net: number(item, "WartoscNetto"),
        total_gross: number(item, "WartoscBrutto"),
        currency: text_or(item, "Waluta", "PLN"),
        payment_status: text_or(item, "StatusPlatnosci", "unpaid"),
        paid_amount: number(item, "KwotaZaplacona"),
        remaining_amount: number(item, "Pozostalo"),
        items: item
            .get("Pozycje")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(map_invoice_item).collect())
            .unwrap_or_default(),
    }
}

fn map_invoice_item(item: &Value) -> ErpInvoiceItem {
    ErpInvoiceItem {
        product_code: text(item, "KodTowaru"),
        product_name: text(item, "NazwaTowaru"),
        quantity: number(item, "Ilosc"),
        unit: text_or(item, "Jednostka", "szt"),
        price_net: number(item, "CenaNetto"),
        vat_rate: item.get("StawkaVAT").and_then(Value::as_i64).unwrap_or(23),
        total_net: number(item, "WartoscNetto"),
        total_gross: number(item, "WartoscBrutto"),
    }
}

pub fn map_delivery_note(customer_code: &str, item: &Value) -> ErpDeliveryNote {
    ErpDeliveryNote {
        document_id: text(item, "Id"),
        document_number: text(item, "Numer"),
        document_type: "WZ".to_string(),
        document_date: text(item, "Data"),
        customer_code: customer_code.to_string(),
        customer_name: text(item, "NazwaKontrahenta"),
        related_invoice: text(item, "PowiazanaFaktura"),
        related_order: text(item, "PowiazaneZamowienie"),
        items: item
            .get("Pozycje")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(map_delivery_item).collect())
            .unwrap_or_default(),
    }
}

fn map_delivery_item(item: &Value) -> ErpDeliveryItem {
    ErpDeliveryItem {
        product_code: text(item, "KodTowaru"),
        product_name: text(item, "NazwaTowaru"),
        quantity: number(item, "Ilosc"),
        unit: text_or(item, "Jednostka", "szt"),
    }
}

pub fn map_payment(item: &Value) -> ErpPayment {
    ErpPayment {
        payment_id: text(item, "Id"),
        payment_date: text(item, "Data"),
        amount: number(item, "Kwota"),
        currency: text_or(item, "Waluta", "PLN"),
        payment_method: text_or(item, "FormaPlatnosci", "transfer"),
        related_invoice: text(item, "PowiazanaFaktura"),
        description: text(item, "Opis"),
    }
}

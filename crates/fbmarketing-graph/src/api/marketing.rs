//! Lead Ads and Marketing API
//!
//! ## Components
//!
//! - Lead forms and leads: [`GraphClient::get_leadgen_forms`],
//!   [`GraphClient::get_leadgen`], [`GraphClient::get_ad_leads`]
//! - Custom audiences: listing, creation and hashed membership updates
//! - Ad accounts of the user

use serde_json::{json, Value};
use tracing::info;

use crate::{
    audience::CustomAudienceSpec,
    catalog, CallArgs, GraphClient, GraphError, Result,
};

/// Filters for [`GraphClient::get_ad_leads`]
#[derive(Debug, Clone, Default)]
pub struct LeadsQuery<'a> {
    /// Unix timestamp lower bound
    pub from_date: Option<&'a str>,
    /// Unix timestamp upper bound
    pub to_date: Option<&'a str>,
    /// Cursor to start after
    pub after: Option<&'a str>,
    pub fields: &'a [&'a str],
}

impl GraphClient {
    // ========================================================================
    // Leads
    // ========================================================================

    /// Gets the lead forms of a page
    ///
    /// Uses `page_token` when given, otherwise the client's token.
    pub async fn get_leadgen_forms(
        &self,
        page_id: &str,
        page_token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new().arg(page_id).token_opt(page_token);
        self.call(&catalog::LEADGEN_FORMS, args).await
    }

    pub async fn get_leadgen(&self, leadgen_id: &str, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new()
            .arg(leadgen_id)
            .fields(fields.iter().copied());
        self.call(&catalog::LEADGEN, args).await
    }

    /// Gets the leads submitted to a form
    pub async fn get_ad_leads(&self, form_id: &str, query: &LeadsQuery<'_>) -> Result<Value> {
        let args = CallArgs::new()
            .arg(form_id)
            .param_opt("from_date", query.from_date)
            .param_opt("to_date", query.to_date)
            .param_opt("after", query.after)
            .fields(query.fields.iter().copied());
        self.call(&catalog::AD_LEADS, args).await
    }

    // ========================================================================
    // Custom audiences
    // ========================================================================

    pub async fn get_custom_audiences(&self, account_id: &str, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new()
            .arg(account_id)
            .fields(fields.iter().copied());
        self.call(&catalog::CUSTOM_AUDIENCES, args).await
    }

    /// Creates an empty custom audience in an ad account
    ///
    /// # Arguments
    /// * `account_id` - Ad account id, `act_<id>`
    /// * `spec` - Name, description, subtype and customer file source
    pub async fn create_custom_audience(
        &self,
        account_id: &str,
        spec: &CustomAudienceSpec,
    ) -> Result<Value> {
        info!(name = %spec.name, "Creating custom audience");
        let args = CallArgs::new().arg(account_id).json(to_body(spec)?);
        self.call(&catalog::CREATE_CUSTOM_AUDIENCE, args).await
    }

    /// Adds people to an audience
    ///
    /// Each record is SHA-256 hashed by [`GraphClient::call`] before it
    /// leaves the process.
    ///
    /// # Arguments
    /// * `audience_id` - Custom audience id
    /// * `schema` - Kind of the records, e.g. `EMAIL`
    /// * `records` - Raw, normalized records
    pub async fn add_users_to_audience<S: AsRef<str>>(
        &self,
        audience_id: &str,
        schema: &str,
        records: &[S],
    ) -> Result<Value> {
        info!(records = records.len(), "Adding users to custom audience");
        let args = CallArgs::new()
            .arg(audience_id)
            .json(raw_records(schema, records));
        self.call(&catalog::ADD_AUDIENCE_USERS, args).await
    }

    /// Removes people from an audience; records are hashed as for
    /// [`GraphClient::add_users_to_audience`]
    pub async fn remove_users_from_audience<S: AsRef<str>>(
        &self,
        audience_id: &str,
        schema: &str,
        records: &[S],
    ) -> Result<Value> {
        info!(records = records.len(), "Removing users from custom audience");
        let args = CallArgs::new()
            .arg(audience_id)
            .json(raw_records(schema, records));
        self.call(&catalog::REMOVE_AUDIENCE_USERS, args).await
    }

    pub async fn get_ad_accounts(&self, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new().fields(fields.iter().copied());
        self.call(&catalog::AD_ACCOUNTS, args).await
    }
}

fn raw_records<S: AsRef<str>>(schema: &str, records: &[S]) -> Value {
    let data: Vec<&str> = records.iter().map(AsRef::as_ref).collect();
    json!({"payload": {"schema": schema, "data": data}})
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| GraphError::InvalidRequest(format!("unserializable body: {e}")))
}

//! Endpoints command - List the endpoint catalog

use anyhow::Result;
use clap::Args;
use fbmarketing_graph::{
    catalog,
    endpoint::{Auth, Verb},
    Endpoint,
};
use serde_json::{json, Value};

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct EndpointsCommand {
    /// Only list endpoints whose name contains this text
    pub filter: Option<String>,
}

impl EndpointsCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format == OutputFormat::Json);
        let endpoints: Vec<&Endpoint> = catalog::ALL
            .iter()
            .copied()
            .filter(|endpoint| {
                self.filter
                    .as_deref()
                    .map_or(true, |filter| endpoint.name.contains(filter))
            })
            .collect();

        if format == OutputFormat::Json {
            let list: Vec<Value> = endpoints.iter().map(|e| describe(e)).collect();
            formatter.print_json(&Value::Array(list));
            return Ok(());
        }

        formatter.success(&format!("{} endpoint(s)", endpoints.len()));
        for endpoint in endpoints {
            formatter.info(&format!(
                "{:<32} {:<6} {:<32} {}",
                endpoint.name,
                verb_name(endpoint.verb),
                endpoint.path,
                endpoint.summary
            ));
        }
        Ok(())
    }
}

fn verb_name(verb: Verb) -> &'static str {
    match verb {
        Verb::Get => "GET",
        Verb::Post => "POST",
        Verb::Delete => "DELETE",
    }
}

fn auth_name(auth: Auth) -> &'static str {
    match auth {
        Auth::None => "none",
        Auth::App => "app",
        Auth::Token => "token",
    }
}

fn describe(endpoint: &Endpoint) -> Value {
    json!({
        "name": endpoint.name,
        "summary": endpoint.summary,
        "method": verb_name(endpoint.verb),
        "path": endpoint.path,
        "auth": auth_name(endpoint.auth),
        "args": endpoint.positional_args(),
        "required_params": endpoint.required_params,
        "paginated": endpoint.verb == Verb::Get,
        "hashed_records": endpoint.hashed_records,
    })
}

//! Statement question-answering against an OpenAI-compatible chat endpoint.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a personal-finance assistant. Answer the \
question using only the transaction lines provided. Each line is: \
transaction date | post date | description | amount | category. Positive \
amounts are charges, negative amounts are credits.";

/// One question, one answer. `document_text` is the statement dump from
/// `FinancialData::document_text()`. The request carries a 60s timeout so a
/// stalled endpoint cannot hang the caller.
pub async fn ask(
    api_key: &str,
    base_url: &str,
    model: &str,
    question: &str,
    document_text: &str,
) -> Result<String> {
    #[derive(Serialize)]
    struct Msg {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<Msg>,
        temperature: f32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let body = Req {
        model: model.to_string(),
        messages: vec![
            Msg {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            Msg {
                role: "user".to_string(),
                content: format!("{question}\n\nTransactions:\n{document_text}"),
            },
        ],
        temperature: 0.2,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("build http client")?;

    let resp = client
        .post(format!("{base_url}/v1/chat/completions"))
        .header(AUTHORIZATION, format!("Bearer {api_key}"))
        .json(&body)
        .send()
        .await
        .context("chat completion request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("chat completion error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse chat completion response")?;
    let answer = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(answer.trim().to_string())
}

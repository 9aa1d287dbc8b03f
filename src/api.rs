//! Calls to the challenge host. Replies are decoded into outcomes here and nowhere else.

use gloo_net::http::Request;
use leptos::logging::log;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::launcher::StartCall;
use crate::model::{
    ChallengeId, StartOutcome, StartReply, StartRequest, SubmitOutcome, SubmitReply,
    SubmitRequest,
};

/// `POST /start/{id}` with an empty JSON body. Non-2xx replies still carry a JSON body (an
/// existing attempt comes back as 403), so the status is not checked.
pub async fn start_challenge(call: &StartCall) -> Result<StartOutcome, ClientError> {
    log!("POST {}", call.url);
    let reply: StartReply = Request::post(&call.url)
        .json(&StartRequest {})?
        .send()
        .await?
        .json()
        .await?;
    Ok(reply.into())
}

/// `POST /submit/{id}` with `{"completed": bool}`.
pub async fn submit_result(
    config: &ClientConfig,
    id: &ChallengeId,
    completed: bool,
) -> Result<SubmitOutcome, ClientError> {
    let url = config.submit_url(id);
    log!("POST {} completed={}", url, completed);
    let reply: SubmitReply = Request::post(&url)
        .json(&SubmitRequest { completed })?
        .send()
        .await?
        .json()
        .await?;
    Ok(reply.into())
}

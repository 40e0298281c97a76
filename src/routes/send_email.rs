use std::fmt::Formatter;

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::chat_client::ChatClient;
use crate::domain::{RequiredField, Submission};
use crate::email_client::{EmailClient, SendEmailReceipt};

#[derive(serde::Deserialize)]
pub struct SubmissionForm {
    name: String,
    mail: String,
    issue: String,
    message: String,
}

impl TryFrom<SubmissionForm> for Submission {
    type Error = String;

    fn try_from(form: SubmissionForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: RequiredField::parse(form.name, "name")?,
            mail: RequiredField::parse(form.mail, "mail")?,
            issue: RequiredField::parse(form.issue, "issue")?,
            message: RequiredField::parse(form.message, "message")?,
        })
    }
}

/// Status answered when one of the notifiers fails.
#[derive(Clone, Copy, Debug)]
pub struct NotifierFailureStatus(pub StatusCode);

impl NotifierFailureStatus {
    pub fn new(legacy: bool) -> Self {
        if legacy {
            Self(StatusCode::METHOD_NOT_ALLOWED)
        } else {
            Self(StatusCode::BAD_GATEWAY)
        }
    }
}

#[derive(serde::Serialize)]
struct Detail<'a> {
    detail: &'a str,
}

pub fn detail_response(status: StatusCode, detail: &str) -> HttpResponse {
    HttpResponse::build(status).json(Detail { detail })
}

#[derive(thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Ooops, mail sending failed")]
    MailDeliveryFailed,
    #[error("Discord webhook failed")]
    ChatNotificationFailed,
}

impl std::fmt::Debug for RelayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn reject(error: RelayError, status: StatusCode) -> InternalError<RelayError> {
    let response = detail_response(status, &error.to_string());
    InternalError::from_response(error, response)
}

/// Turns body deserialization failures into `422 Unprocessable Entity`.
pub fn json_error_handler(
    error: actix_web::error::JsonPayloadError,
    _request: &HttpRequest,
) -> actix_web::Error {
    let response = detail_response(StatusCode::UNPROCESSABLE_ENTITY, &error.to_string());
    InternalError::from_response(error, response).into()
}

#[tracing::instrument(
    name = "Relaying a contact submission",
    skip(form, email_client, chat_client, failure_status),
    fields(
        submitter_name = %form.name,
        submitter_mail = %form.mail
    )
)]
pub async fn send_email(
    form: web::Json<SubmissionForm>,
    email_client: web::Data<EmailClient>,
    chat_client: web::Data<ChatClient>,
    failure_status: web::Data<NotifierFailureStatus>,
) -> Result<HttpResponse, InternalError<RelayError>> {
    let submission: Submission = form.0.try_into().map_err(|e| {
        reject(
            RelayError::ValidationError(e),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    })?;

    if send_submission_mail(&email_client, &submission).await.is_none() {
        return Err(reject(RelayError::MailDeliveryFailed, failure_status.0));
    }

    if !chat_client.notify_new_submission().await {
        return Err(reject(RelayError::ChatNotificationFailed, failure_status.0));
    }

    Ok(detail_response(StatusCode::OK, "Everything is fine."))
}

/// Deliver the submission to the receiving inbox.
///
/// Provider and transport errors are logged and reported as `None`.
#[tracing::instrument(
    name = "Send the submission by email",
    skip(email_client, submission)
)]
pub async fn send_submission_mail(
    email_client: &EmailClient,
    submission: &Submission,
) -> Option<SendEmailReceipt> {
    match email_client
        .send_email(submission.issue.as_ref(), &submission.email_body())
        .await
    {
        Ok(receipt) => {
            tracing::info!(email_id = %receipt.id, "The submission was accepted for delivery");
            Some(receipt)
        }
        Err(e) => {
            tracing::error!(
                error.message = %e,
                error.cause_chain = ?e,
                "Failed to send the submission by email"
            );
            None
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

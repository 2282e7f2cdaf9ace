use sqlx::SqliteConnection;

use crate::{
    db::{self, NewContact},
    payload::Payload,
    validate, ApiResponse, AppError, AppResult, Created,
};

const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

pub async fn send(conn: &mut SqliteConnection, data: &Payload) -> AppResult<ApiResponse> {
    validate::require_fields(data, &FIELDS)?;
    validate::validate_email(data.get("email").unwrap_or_default())?;

    let field = |name| data.get(name).unwrap_or_default().trim();

    let contact = NewContact {
        name: field("name"),
        email: field("email"),
        subject: field("subject"),
        message: field("message"),
    };

    let contact_id = db::insert_contact(conn, &contact).await.map_err(AppError::Contact)?;

    tracing::info!(contact_id, "contact message stored");
    Ok(ApiResponse::created(
        "Message sent successfully! We will get back to you soon.",
        Created::ContactId(contact_id),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn payload(pairs: &[(&str, &str)]) -> Payload {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[tokio::test]
    async fn stores_trimmed_message() {
        let store = Store::in_memory().await.unwrap();
        let mut conn = store.open().await.unwrap();

        let data = payload(&[
            ("name", " Jane "),
            ("email", "jane@x.com"),
            ("subject", "Hi"),
            ("message", "\tHello\n"),
        ]);
        let resp = send(&mut conn, &data).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, "Message sent successfully! We will get back to you soon.");
        let Some(Created::ContactId(id)) = resp.created else {
            panic!("no contact id in {resp:?}");
        };

        let stored = db::find_contact(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(
            (stored.name.as_str(), stored.email.as_str(), stored.subject.as_str(), stored.message.as_str()),
            ("Jane", "jane@x.com", "Hi", "Hello")
        );
    }

    #[tokio::test]
    async fn requires_every_field() {
        let store = Store::in_memory().await.unwrap();
        let mut conn = store.open().await.unwrap();

        let data = payload(&[("name", "Jane"), ("email", "jane@x.com"), ("subject", "Hi"), ("message", " ")]);
        assert!(matches!(send(&mut conn, &data).await, Err(AppError::MissingFields)));

        let data = payload(&[("name", "Jane"), ("email", "jane@x.com"), ("message", "Hello")]);
        assert!(matches!(send(&mut conn, &data).await, Err(AppError::MissingFields)));
    }

    #[tokio::test]
    async fn rejects_bad_email() {
        let store = Store::in_memory().await.unwrap();
        let mut conn = store.open().await.unwrap();

        let data = payload(&[("name", "Jane"), ("email", "not-an-email"), ("subject", "Hi"), ("message", "Hello")]);
        assert!(matches!(send(&mut conn, &data).await, Err(AppError::InvalidEmail)));
    }

    #[tokio::test]
    async fn padded_email_is_invalid() {
        let store = Store::in_memory().await.unwrap();
        let mut conn = store.open().await.unwrap();

        let data = payload(&[("name", "Jane"), ("email", "jane@x.com "), ("subject", "Hi"), ("message", "Hello")]);
        assert!(matches!(send(&mut conn, &data).await, Err(AppError::InvalidEmail)));
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let store = Store::in_memory().await.unwrap();
        let mut conn = store.open().await.unwrap();
        sqlx::query("DROP TABLE contacts").execute(&mut *conn).await.unwrap();

        let data = payload(&[("name", "Jane"), ("email", "jane@x.com"), ("subject", "Hi"), ("message", "Hello")]);
        let err = send(&mut conn, &data).await.unwrap_err();
        assert!(matches!(err, AppError::Contact(_)));
        assert_eq!(err.to_string(), "Failed to send message");
    }
}

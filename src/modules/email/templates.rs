use super::message::Notification;

/// Function to build the registration confirmation e-mail
///
/// The body carries a fully qualified link back to this service's confirm
/// endpoint with the single-use token attached.
pub fn confirmation_email(to: &str, origin: &str, token: &str) -> Notification {
    let body = format!(
        "To confirm your e-mail address, please click the link below:\n{}/confirm?token={}",
        origin, token
    );

    Notification {
        to: to.to_string(),
        subject: "Registration Confirmation".to_string(),
        body,
    }
}

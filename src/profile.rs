use crate::schema::UserProfile;
use crate::validation::ValidationErrors;

/// Profile settings form input before validation
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub clinic_name: String,
}

impl ProfileForm {
    /// Prefill the form from the current profile, the way the settings
    /// screen opens
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            clinic_name: profile.clinic_name.clone(),
        }
    }
}

/// Minimal well-formedness check: something before the @, and a dot
/// somewhere after it
fn email_looks_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

/// Apply the settings form to the profile
///
/// Rejection leaves the profile untouched and returns field-keyed messages.
pub fn update_profile(profile: &mut UserProfile, form: ProfileForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if form.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    if !email_looks_valid(&form.email) {
        errors.add("email", "Enter a valid email address");
    }
    errors.into_result()?;

    profile.name = form.name;
    profile.email = form.email;
    profile.phone = form.phone;
    profile.clinic_name = form.clinic_name;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::mock_profile;

    #[test]
    fn test_update_profile() {
        let mut profile = mock_profile();
        let mut form = ProfileForm::from_profile(&profile);
        form.name = "Alice Smith-Jones".to_string();
        form.phone = "555-0199".to_string();
        update_profile(&mut profile, form).unwrap();
        assert_eq!(profile.name, "Alice Smith-Jones");
        assert_eq!(profile.phone, "555-0199");
        // untouched fields survive
        assert_eq!(profile.role, "Practice Manager");
    }

    #[test]
    fn test_invalid_form_leaves_profile_untouched() {
        let mut profile = mock_profile();
        let before = profile.clone();
        let form = ProfileForm {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            phone: "555-0000".to_string(),
            clinic_name: "Elsewhere".to_string(),
        };
        let err = update_profile(&mut profile, form).unwrap_err();
        assert!(err.get("name").is_some());
        assert!(err.get("email").is_some());
        assert_eq!(profile.name, before.name);
        assert_eq!(profile.email, before.email);
        assert_eq!(profile.clinic_name, before.clinic_name);
    }

    #[test]
    fn test_email_shapes() {
        assert!(email_looks_valid("a@b.co"));
        assert!(email_looks_valid("front.desk@clinic.example.org"));
        assert!(!email_looks_valid("@b.co"));
        assert!(!email_looks_valid("a@nodot"));
        assert!(!email_looks_valid("plainstring"));
        assert!(!email_looks_valid(""));
    }

    #[test]
    fn test_notification_toggles() {
        let mut profile = mock_profile();
        assert!(!profile.notifications.sms);
        profile.notifications.sms = true;
        profile.notifications.claim_updates = false;
        assert!(profile.notifications.sms);
        assert!(!profile.notifications.claim_updates);
    }
}

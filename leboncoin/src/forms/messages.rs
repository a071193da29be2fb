use super::validators::FieldError;
use leboncoin_api::FailureKind;

pub const UNREACHABLE: &str = "Impossible de contacter le serveur";

/// Form inputs that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

pub fn field_error(field: Field, error: FieldError) -> &'static str {
    match (field, error) {
        (Field::Email, FieldError::Required) => "L'email est requis",
        (Field::Email, _) => "Email invalide",
        (Field::Password, FieldError::Required) => "Le mot de passe est requis",
        (Field::Password, _) => "Le mot de passe doit contenir au moins 6 caractères",
        (Field::ConfirmPassword, FieldError::Required) => "Veuillez confirmer votre mot de passe",
        (Field::ConfirmPassword, _) => "Les mots de passe ne correspondent pas",
    }
}

pub fn sign_in_failure(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Unauthorized => "Email ou mot de passe incorrect",
        FailureKind::Unreachable => UNREACHABLE,
        FailureKind::Conflict | FailureKind::BadRequest | FailureKind::Unknown => {
            "Une erreur est survenue lors de la connexion"
        }
    }
}

pub fn sign_up_failure(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Conflict => "Cet email est déjà utilisé",
        FailureKind::BadRequest => "Données invalides",
        FailureKind::Unreachable => UNREACHABLE,
        FailureKind::Unauthorized | FailureKind::Unknown => {
            "Une erreur est survenue lors de l'inscription"
        }
    }
}

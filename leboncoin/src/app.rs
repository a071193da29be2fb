use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::forms::{SignInForm, SignUpForm, SubmitOutcome};
use crate::logging::init_logging;
use leboncoin_auth::{
    IdentityClient, IdentityService, RouteTable, Settings, SIGN_IN_PATH, SIGN_UP_PATH,
};

/// Posting an ad needs an account
pub const NEW_AD_PATH: &str = "/ads/new";

type InputLines = Lines<BufReader<Stdin>>;

/// Route table used by the application
pub fn routes() -> RouteTable {
    RouteTable::default().protect(NEW_AD_PATH)
}

/// Line-based terminal front end over the sign-in and sign-up forms
pub struct App {
    settings: Settings,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    SignIn,
    SignUp,
    SignOut,
    Status,
    Go(String),
    Help,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        let command = match parts.next()? {
            "login" => Self::SignIn,
            "signup" => Self::SignUp,
            "logout" => Self::SignOut,
            "status" => Self::Status,
            "go" => Self::Go(parts.next()?.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let (log_path, _guard) = init_logging()?;

        tracing::info!("leboncoin starting");
        tracing::debug!("Logging to {}", log_path.display());

        let client = leboncoin_auth::connect(&self.settings, routes())?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        print_help();
        loop {
            prompt(&format!("[{}] > ", client.router().current()))?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Command::parse(line.trim()) {
                Some(Command::SignIn) => sign_in(&client, &mut lines).await?,
                Some(Command::SignUp) => sign_up(&client, &mut lines).await?,
                Some(Command::SignOut) => {
                    client.logout();
                    println!("Vous êtes déconnecté.");
                }
                Some(Command::Status) => print_status(&client),
                Some(Command::Go(path)) => {
                    let landed = client.router().navigate(&path);
                    if landed != path {
                        println!("Accès refusé, redirection vers {}", landed);
                    }
                }
                Some(Command::Help) => print_help(),
                Some(Command::Quit) => break,
                None if line.trim().is_empty() => {}
                None => println!("Commande inconnue, tapez 'help'"),
            }
        }

        tracing::info!("leboncoin exiting");
        Ok(())
    }
}

async fn sign_in<S: IdentityService>(
    client: &IdentityClient<S>,
    lines: &mut InputLines,
) -> Result<()> {
    if client.router().navigate(SIGN_IN_PATH) != SIGN_IN_PATH {
        println!("Vous êtes déjà connecté.");
        return Ok(());
    }

    let mut form = SignInForm::new();
    form.set_email(read_field(lines, "Email").await?);
    form.set_password(read_field(lines, "Mot de passe").await?);

    match form.submit(client).await {
        SubmitOutcome::Invalid => {
            print_errors(&[form.email_error(), form.password_error()]);
        }
        SubmitOutcome::SignedIn => println!("Connexion réussie."),
        _ => print_errors(&[form.error_message()]),
    }
    Ok(())
}

async fn sign_up<S: IdentityService>(
    client: &IdentityClient<S>,
    lines: &mut InputLines,
) -> Result<()> {
    if client.router().navigate(SIGN_UP_PATH) != SIGN_UP_PATH {
        println!("Vous êtes déjà connecté.");
        return Ok(());
    }

    let mut form = SignUpForm::new();
    form.set_email(read_field(lines, "Email").await?);
    form.set_password(read_field(lines, "Mot de passe").await?);
    form.set_confirm_password(read_field(lines, "Confirmer le mot de passe").await?);

    match form.submit(client).await {
        SubmitOutcome::Invalid => print_errors(&[
            form.email_error(),
            form.password_error(),
            form.confirm_password_error(),
        ]),
        SubmitOutcome::Registered { signed_in: true } => {
            println!("Compte créé, vous êtes connecté.")
        }
        SubmitOutcome::Registered { signed_in: false } => {
            println!("Compte créé, veuillez vous connecter.")
        }
        _ => print_errors(&[form.error_message()]),
    }
    Ok(())
}

async fn read_field(lines: &mut InputLines, label: &str) -> Result<String> {
    prompt(&format!("{}: ", label))?;
    Ok(lines.next_line().await?.unwrap_or_default().trim().to_string())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(())
}

fn print_errors(errors: &[Option<&'static str>]) {
    for error in errors.iter().flatten() {
        eprintln!("  ✗ {}", error);
    }
}

fn print_status<S: IdentityService>(client: &IdentityClient<S>) {
    let state = client.session().state();
    match (state.is_authenticated, state.current_user) {
        (true, Some(user)) => println!("Connecté en tant que {}", user.email),
        (true, None) => println!("Connecté (session restaurée)"),
        (false, _) => println!("Non connecté"),
    }
}

fn print_help() {
    println!("Commandes : login, signup, logout, status, go <chemin>, help, quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("login"), Some(Command::SignIn));
        assert_eq!(Command::parse("signup"), Some(Command::SignUp));
        assert_eq!(Command::parse("logout"), Some(Command::SignOut));
        assert_eq!(
            Command::parse("go /ads/new"),
            Some(Command::Go("/ads/new".to_string()))
        );
        assert_eq!(Command::parse("q"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_unknown_or_incomplete() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("go"), None);
        assert_eq!(Command::parse("delete-account"), None);
    }
}

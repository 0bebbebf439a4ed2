//! OAuth credentials and auth secret in the env file

use colored::Colorize;

use super::Ctx;
use crate::devvars::EnvFile;
use crate::secret::{generate_hex_secret, AUTH_SECRET_LEN};
use crate::setup::context::StepResult;

const GOOGLE_ID_KEY: &str = "AUTH_GOOGLE_ID";
const GOOGLE_SECRET_KEY: &str = "AUTH_GOOGLE_SECRET";
const AUTH_SECRET_KEY: &str = "AUTH_SECRET";

const OAUTH_INSTRUCTIONS: &str = "\
Set up Google OAuth 2.0 for authentication:
  1. Open https://console.cloud.google.com/ and pick or create a project.
  2. Configure the OAuth consent screen (APIs & Services > OAuth consent screen).
  3. Create an OAuth client ID of type 'Web application' (APIs & Services > Credentials).
  4. Authorized JavaScript origins: http://localhost:3000 and your production domain.
  5. Authorized redirect URIs: http://localhost:3000/api/auth/callback/google
     and <production domain>/api/auth/callback/google.
  6. Copy the Client ID and Client secret.";

pub(super) fn prompt_oauth_credentials(ctx: &mut Ctx<'_>) -> StepResult {
    let env_file = EnvFile::new(&ctx.paths.env_file);
    let contents = match env_file.read() {
        Ok(contents) => contents,
        Err(e) => return StepResult::SuccessWithWarning(format!("{e:#}")),
    };

    let has = |key: &str| contents.contains(&format!("{key}="));
    if has(GOOGLE_ID_KEY) && has(GOOGLE_SECRET_KEY) {
        println!("  Google OAuth credentials already present, skipping");
        return StepResult::Success;
    }

    println!("{}", OAUTH_INSTRUCTIONS.cyan());

    let client_id = match ctx
        .prompter
        .text("Google Client ID (leave empty to skip)", "")
    {
        Ok(v) => v,
        Err(e) => return e.into(),
    };
    let client_secret = match ctx
        .prompter
        .text("Google Client Secret (leave empty to skip)", "")
    {
        Ok(v) => v,
        Err(e) => return e.into(),
    };

    if client_id.is_empty() && client_secret.is_empty() {
        println!("  Google OAuth setup skipped");
        return StepResult::Success;
    }

    match env_file.append_missing(&[
        (GOOGLE_ID_KEY, client_id.as_str()),
        (GOOGLE_SECRET_KEY, client_secret.as_str()),
    ]) {
        Ok(written) if !written.is_empty() => {
            println!(
                "  {} Added {} to {}",
                "✓".green(),
                written.join(", "),
                env_file.path().display()
            );
            StepResult::Success
        }
        Ok(_) => StepResult::Success,
        Err(e) => StepResult::SuccessWithWarning(format!("{e:#}")),
    }
}

pub(super) fn ensure_auth_secret(ctx: &mut Ctx<'_>) -> StepResult {
    let env_file = EnvFile::new(&ctx.paths.env_file);
    match env_file.contains_key(AUTH_SECRET_KEY) {
        Ok(true) => {
            println!("  {AUTH_SECRET_KEY} already present, skipping");
            return StepResult::Success;
        }
        Ok(false) => {}
        Err(e) => return StepResult::SuccessWithWarning(format!("{e:#}")),
    }

    let secret = generate_hex_secret(AUTH_SECRET_LEN);
    match env_file.append_missing(&[(AUTH_SECRET_KEY, secret.as_str())]) {
        Ok(_) => {
            println!(
                "  {} Generated {} in {}",
                "✓".green(),
                AUTH_SECRET_KEY,
                env_file.path().display()
            );
            StepResult::Success
        }
        Err(e) => StepResult::SuccessWithWarning(format!("{e:#}")),
    }
}

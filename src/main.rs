//! Question Form - command-line driver for the question authoring engine
//!
//! Lists subjects and competencies from the backend, or hydrates a form from
//! a JSON record and submits it.

use anyhow::{anyhow, bail, Context, Result};
use question_form::api::{HttpApi, SharedToken};
use question_form::config::FormConfig;
use question_form::notify::TracingNotifier;
use question_form::{FieldUpdate, FormController, FormMode, Question};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = concat!(
    "usage: question-form ",
    "<subjects | competencies <subject-id> | submit <record.json> | token <value>>"
);

fn controller(config: &FormConfig) -> Result<FormController<HttpApi>> {
    let tokens = Arc::new(SharedToken::new(config.access_token.clone()));
    let api = HttpApi::new(config.api_base_url(), tokens, config.request_timeout())?;
    Ok(FormController::new(Arc::new(api), Arc::new(TracingNotifier)))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "question_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = FormConfig::load()?;

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["subjects"] => {
            let mut form = controller(&config)?;
            form.load_subjects().await;
            for subject in form.subjects() {
                println!("{}\t{}", subject.id, subject.display_name());
            }
        }
        ["competencies", subject_id] => {
            let mut form = controller(&config)?;
            let request = form.set_field(FieldUpdate::Subject(Some(subject_id.to_string())));
            form.settle(request).await;
            for competency in form.competencies() {
                println!("{}\t{}", competency.id, competency.name);
            }
        }
        ["submit", path] => {
            let content =
                std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let record: Question =
                serde_json::from_str(&content).with_context(|| format!("parsing {path}"))?;

            let mut form = controller(&config)?;
            let request = form.hydrate(record);
            form.settle(request).await;
            if let FormMode::Edit { id } = form.mode() {
                tracing::info!("updating question {id}");
            }

            match form.submit().await.map_err(|err| anyhow!(err.user_message()))? {
                Some(saved) => println!("{}", serde_json::to_string_pretty(&saved)?),
                None => println!("saved"),
            }
        }
        ["token", value] => {
            config.access_token = Some(value.to_string());
            config.save()?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

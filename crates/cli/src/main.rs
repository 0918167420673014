use clap::{Parser, Subcommand};
use patientor_core::{
    config::{api_base_url_from_env_value, request_timeout_from_env_value},
    ClientConfig, EntryForm, EntryType, HealthCheckRating, HttpPatientsApi, NonEmptyText,
    PageView, PatientPage, PatientsApi,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "patientor")]
#[command(about = "Patientor patient records front-end")]
struct Cli {
    /// Base URL of the patients API (overrides PATIENTOR_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a patient and their entries
    Show {
        /// Patient id
        patient_id: String,
    },
    /// List all known diagnoses
    Diagnoses,
    /// Add a new entry to a patient
    AddEntry {
        /// Patient id
        patient_id: String,
        /// Entry type (Hospital, HealthCheck or OccupationalHealthCare)
        #[arg(long = "type", default_value = "Hospital")]
        entry_type: EntryType,
        #[arg(long)]
        specialist: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Entry date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Diagnosis codes (comma-separated)
        #[arg(long)]
        diagnosis_codes: Option<String>,
        #[arg(long)]
        discharge_date: Option<String>,
        #[arg(long)]
        discharge_criteria: Option<String>,
        #[arg(long)]
        employer_name: Option<String>,
        #[arg(long)]
        sick_leave_start: Option<String>,
        #[arg(long)]
        sick_leave_end: Option<String>,
        /// Health check rating, by rank (0-3) or name
        #[arg(long)]
        health_check_rating: Option<HealthCheckRating>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patientor=info".parse()?)
                .add_directive("patientor_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api_url = api_base_url_from_env_value(
        cli.api_url
            .or_else(|| std::env::var("PATIENTOR_API_URL").ok()),
    );
    let timeout =
        request_timeout_from_env_value(std::env::var("PATIENTOR_REQUEST_TIMEOUT_SECS").ok())?;
    let cfg = ClientConfig::new(&api_url, timeout)?;
    let api = HttpPatientsApi::new(&cfg)?;

    match cli.command {
        Some(Commands::Show { patient_id }) => {
            let mut page = PatientPage::new(api, NonEmptyText::new(patient_id)?);
            page.mount().await;
            print_page(&page.view())?;
        }
        Some(Commands::Diagnoses) => {
            let diagnoses = api.get_all_diagnoses().await.map_err(|e| {
                tracing::error!("failed to list diagnoses: {}", e);
                anyhow::anyhow!(e.user_message())
            })?;
            if diagnoses.is_empty() {
                println!("No diagnoses found.");
            }
            for diagnosis in diagnoses {
                match diagnosis.latin {
                    Some(latin) => println!("{} {} ({})", diagnosis.code, diagnosis.name, latin),
                    None => println!("{} {}", diagnosis.code, diagnosis.name),
                }
            }
        }
        Some(Commands::AddEntry {
            patient_id,
            entry_type,
            specialist,
            description,
            date,
            diagnosis_codes,
            discharge_date,
            discharge_criteria,
            employer_name,
            sick_leave_start,
            sick_leave_end,
            health_check_rating,
        }) => {
            let mut form = EntryForm::new();
            form.select_entry_type(entry_type);
            if let Some(value) = specialist {
                form.set_specialist(value);
            }
            if let Some(value) = description {
                form.set_description(value);
            }
            if let Some(value) = date {
                form.set_date(value);
            }
            if let Some(value) = diagnosis_codes {
                form.set_diagnosis_codes(value);
            }
            if let Some(value) = discharge_date {
                form.set_discharge_date(value);
            }
            if let Some(value) = discharge_criteria {
                form.set_discharge_criteria(value);
            }
            if let Some(value) = employer_name {
                form.set_employer_name(value);
            }
            if let Some(value) = sick_leave_start {
                form.set_sick_leave_start_date(value);
            }
            if let Some(value) = sick_leave_end {
                form.set_sick_leave_end_date(value)?;
            }
            if let Some(rating) = health_check_rating {
                form.select_health_check_rating(rating);
            }

            let mut page = PatientPage::new(api, NonEmptyText::new(patient_id)?);
            page.mount().await;
            if let PageView::Failed(message) = page.view() {
                anyhow::bail!("could not load patient: {message}");
            }

            page.open_modal();
            page.submit_form(&mut form).await?;
            print_page(&page.view())?;
        }
        None => {
            println!("Use 'patientor --help' for commands");
        }
    }

    Ok(())
}

fn print_page(view: &PageView) -> anyhow::Result<()> {
    match view {
        PageView::Ready(patient) => {
            println!("{patient}");
            Ok(())
        }
        PageView::Failed(message) => anyhow::bail!("could not load patient: {message}"),
        PageView::Loading => anyhow::bail!("patient has not loaded"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_entry_arguments() {
        let cli = Cli::try_parse_from([
            "patientor",
            "add-entry",
            "d2773336",
            "--type",
            "HealthCheck",
            "--specialist",
            "MD House",
            "--health-check-rating",
            "2",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Commands::AddEntry {
                entry_type,
                health_check_rating,
                specialist,
                ..
            }) => {
                assert_eq!(entry_type, EntryType::HealthCheck);
                assert_eq!(health_check_rating, Some(HealthCheckRating::HighRisk));
                assert_eq!(specialist.as_deref(), Some("MD House"));
            }
            _ => panic!("expected add-entry command"),
        }
    }

    #[test]
    fn rejects_unknown_entry_type() {
        let result = Cli::try_parse_from(["patientor", "add-entry", "p1", "--type", "Dental"]);
        assert!(result.is_err());
    }
}

//! geotrack — administrative console for the image-report pages.
//!
//! Usage:
//!   geotrack images [--search KEYWORD] [--page N] [--page-size N]
//!   geotrack devices [--all]
//!   geotrack upload --device-id N --latitude F --longitude F <FILE>
//!   geotrack remove <ID>
//!   geotrack show-all-devices <true|false>

use std::env;
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geotrack_client::ApiClient;
use geotrack_console::{ReportPage, SettingsPage, UploadPage};
use geotrack_core::{FilePreferences, PreferenceStore, UploadPhase};

#[derive(Debug)]
enum Command {
    Images {
        search: String,
        page: usize,
        page_size: usize,
    },
    Devices {
        all: bool,
    },
    Upload {
        device_id: i64,
        latitude: f64,
        longitude: f64,
        file: PathBuf,
    },
    Remove {
        id: i64,
    },
    ShowAllDevices {
        value: bool,
    },
}

fn parse_args() -> Option<Command> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str)?;

    match command {
        "images" => {
            let mut search = String::new();
            let mut page = 0;
            let mut page_size = geotrack_core::defaults::PAGE_SIZE;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--search" | "-s" => {
                        i += 1;
                        if i < args.len() {
                            search = args[i].clone();
                        }
                    }
                    "--page" | "-p" => {
                        i += 1;
                        page = args.get(i).and_then(|v| v.parse().ok()).unwrap_or(0);
                    }
                    "--page-size" => {
                        i += 1;
                        page_size = args
                            .get(i)
                            .and_then(|v| v.parse().ok())
                            .unwrap_or(page_size);
                    }
                    _ => {}
                }
                i += 1;
            }
            Some(Command::Images {
                search,
                page,
                page_size,
            })
        }
        "devices" => Some(Command::Devices {
            all: args.iter().any(|a| a == "--all" || a == "-a"),
        }),
        "upload" => {
            let mut device_id = None;
            let mut latitude = None;
            let mut longitude = None;
            let mut file = None;
            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--device-id" => {
                        i += 1;
                        device_id = args.get(i).and_then(|v| v.parse().ok());
                    }
                    "--latitude" => {
                        i += 1;
                        latitude = args.get(i).and_then(|v| v.parse().ok());
                    }
                    "--longitude" => {
                        i += 1;
                        longitude = args.get(i).and_then(|v| v.parse().ok());
                    }
                    other if !other.starts_with('-') => {
                        file = Some(PathBuf::from(other));
                    }
                    _ => {}
                }
                i += 1;
            }
            Some(Command::Upload {
                device_id: device_id?,
                latitude: latitude?,
                longitude: longitude?,
                file: file?,
            })
        }
        "remove" => Some(Command::Remove {
            id: args.get(2).and_then(|v| v.parse().ok())?,
        }),
        "show-all-devices" => Some(Command::ShowAllDevices {
            value: args.get(2).and_then(|v| v.parse().ok())?,
        }),
        _ => None,
    }
}

fn print_usage() {
    println!(
        r#"geotrack — administrative console for image reports

Usage:
  geotrack images [--search KEYWORD] [--page N] [--page-size 10|25|50]
  geotrack devices [--all]
  geotrack upload --device-id N --latitude F --longitude F <FILE>
  geotrack remove <ID>
  geotrack show-all-devices <true|false>

Environment Variables:
  GEOTRACK_BASE_URL      Tracking server URL (default: http://127.0.0.1:8082)
  GEOTRACK_TIMEOUT_SECS  Request timeout in seconds (default: 30)
  GEOTRACK_PREFS_PATH    Persisted preferences file path
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "geotrack=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = parse_args() else {
        print_usage();
        std::process::exit(2);
    };

    match command {
        Command::Images {
            search,
            page,
            page_size,
        } => {
            let client = ApiClient::from_env()?;
            let prefs = FilePreferences::from_env();
            let mut report = ReportPage::new(&client, &prefs);
            report.set_page_size(page_size);
            report.refresh().await;

            if let Some(error) = report.last_error() {
                eprintln!("failed to load image reports: {error}");
                std::process::exit(1);
            }

            report.set_keyword(&search);
            report.set_page_index(page);

            println!("{:<6} {:<20} {:<14} {:<20} {:<22} upload", "id", "device", "identifier", "uploaded", "position");
            for record in report.visible() {
                let (unique_id, name) = report.devices().display_fields(record.device_id);
                println!(
                    "{:<6} {:<20} {:<14} {:<20} {:<22} {}",
                    record.id,
                    name,
                    unique_id,
                    record.display_timestamp(),
                    format!("{}, {}", record.latitude, record.longitude),
                    record.upload_path(),
                );
            }
            let count = report.filtered_count();
            println!(
                "page {} of {} ({} matching records){}{}",
                report.pager().page_index() + 1,
                report.pager().page_count(count),
                count,
                if report.has_previous() { " [prev]" } else { "" },
                if report.has_next() { " [next]" } else { "" },
            );
        }
        Command::Devices { all } => {
            let client = ApiClient::from_env()?;
            let devices = client.list_devices(all).await?;
            if devices.is_empty() {
                println!("no devices visible");
                return Ok(());
            }
            for device in devices {
                println!("{}\t{}\t{}", device.id, device.unique_id, device.name);
            }
        }
        Command::Upload {
            device_id,
            latitude,
            longitude,
            file,
        } => {
            let client = ApiClient::from_env()?;
            let bytes = tokio::fs::read(&file).await?;
            let source_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let mut upload = UploadPage::new(&client);
            upload.form_mut().set_device_id(device_id);
            upload.form_mut().set_position(latitude, longitude);
            upload.form_mut().select_file(&source_name, bytes);

            if !upload.submit_metadata().await {
                eprintln!(
                    "metadata upload failed: {}",
                    upload.last_error().unwrap_or("unknown error")
                );
                std::process::exit(1);
            }
            if !upload.attach().await {
                eprintln!(
                    "file upload failed (metadata record {} kept for retry): {}",
                    upload.form().created_id().unwrap_or_default(),
                    upload.last_error().unwrap_or("unknown error")
                );
                std::process::exit(1);
            }
            if let UploadPhase::Attached(id) = upload.phase() {
                println!("uploaded image report {id}");
            }
        }
        Command::Remove { id } => {
            let client = ApiClient::from_env()?;
            let mut settings = SettingsPage::new(&client);
            settings.remove(id).await?;
            println!("removed image report {id}");
        }
        Command::ShowAllDevices { value } => {
            let mut prefs = FilePreferences::from_env();
            prefs.set_show_all_devices(value)?;
            println!(
                "show-all-devices set to {value} ({})",
                prefs.path().display()
            );
        }
    }

    Ok(())
}

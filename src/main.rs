use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use plotcert::record::PlotSize;
use plotcert::{link, verify, AllotmentRecord, CertificateConfig};

#[derive(Parser)]
#[command(
    name = "plotcert",
    version,
    about = "Issue plot allotment certificates and verify their QR links"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a certificate: render it, print the verification link, export
    Issue(IssueArgs),
    /// Decode a verification link and show the read-only report
    Verify {
        /// Verification URL, or a bare percent-encoded `data` value
        link: String,
        /// Organization named in the report footer
        #[arg(long, default_value = "Estate Arena")]
        organization: String,
    },
}

#[derive(Args)]
struct IssueArgs {
    /// Read the record from a JSON file instead of the field flags
    #[arg(long, value_name = "FILE")]
    from_json: Option<PathBuf>,

    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long)]
    father_name: Option<String>,
    #[arg(long, default_value = "")]
    cnic: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long)]
    project_name: Option<String>,
    #[arg(long, default_value = "")]
    plot_no: String,
    #[arg(long, default_value_t = PlotSize::default())]
    plot_size: PlotSize,
    /// Issue date (ISO 8601); defaults to today
    #[arg(long)]
    issue_date: Option<chrono::NaiveDate>,

    /// Directory the certificate PDF is written to
    #[arg(long, default_value = ".")]
    pdf_dir: PathBuf,
    /// Skip writing the PDF
    #[arg(long)]
    no_pdf: bool,
    /// Also write the rendered surface as a PNG
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,
    /// Hand the certificate to the platform print pipeline
    #[arg(long)]
    print: bool,

    /// Verification endpoint embedded in the QR payload
    #[arg(long, default_value = "https://estatearena.example/verify")]
    base_url: String,
    /// Issuing organization shown on the masthead
    #[arg(long, default_value = "Estate Arena")]
    organization: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Issue(args) => issue(args).await,
        Commands::Verify { link, organization } => verify_link(&link, &organization),
    }
}

async fn issue(args: IssueArgs) -> anyhow::Result<()> {
    let record = match &args.from_json {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("could not open {}", path.display()))?;
            serde_json::from_reader::<_, AllotmentRecord>(file)
                .with_context(|| format!("could not parse record from {}", path.display()))?
        }
        None => AllotmentRecord {
            full_name: args.full_name.clone(),
            father_name: args.father_name.clone(),
            cnic: args.cnic.clone(),
            address: args.address.clone(),
            phone: args.phone.clone(),
            project_name: args.project_name.clone(),
            plot_no: args.plot_no.clone(),
            plot_size: args.plot_size,
            issue_date: args
                .issue_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        },
    };

    if let Err(e) = record.validate() {
        anyhow::bail!("Please fill in all required fields before generating a certificate ({e})");
    }

    let config = CertificateConfig {
        organization: args.organization.clone(),
        verify_base_url: args.base_url.clone(),
        ..Default::default()
    };

    let issued = plotcert::issue(&record, &config)?;
    println!("Certificate ref: {}", record.reference_id());
    println!("Verification link: {}", issued.verification_url);

    if let Some(path) = &args.png {
        std::fs::write(path, &issued.image.png_data)
            .with_context(|| format!("could not write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    #[cfg(feature = "pdf")]
    {
        if !args.no_pdf || args.print {
            let handle = plotcert::ExportHandle::new(config.clone()).await?;
            if !args.no_pdf {
                let path = handle.export_pdf(record.clone(), args.pdf_dir.clone()).await?;
                println!("Wrote {}", path.display());
            }
            #[cfg(feature = "print")]
            {
                if args.print {
                    handle.print(record.clone()).await?;
                    println!("Sent to printer");
                }
            }
            handle.close().await?;
        }
    }

    #[cfg(not(feature = "pdf"))]
    {
        if !args.no_pdf || args.print {
            log::warn!("built without the pdf feature; PDF export and printing are unavailable");
        }
    }

    Ok(())
}

fn verify_link(link: &str, organization: &str) -> anyhow::Result<()> {
    let decoded = if link.contains("://") {
        link::decode_verification_url(link)
    } else {
        link::decode_data_param(link)
    };

    match decoded {
        Ok(record) => {
            let today = chrono::Local::now().date_naive();
            print!("{}", verify::render_report(&record, organization, today));
            Ok(())
        }
        Err(_) => {
            println!("{}", verify::INVALID_CERTIFICATE);
            std::process::exit(1);
        }
    }
}

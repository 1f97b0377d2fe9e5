use clap::Parser;
use cookie::CookieJar;
use ctran_client::{EventRecorder, get_or_create_session_id};

/// Fire a couple of telemetry events at a running collector, the way the
/// browser does on page load, and print the session identity used.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the running server
    #[arg(default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Page path to report with the view event
    #[arg(default_value = "/")]
    page: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut jar = CookieJar::new();
    let recorder = EventRecorder::new(&args.server);

    let session_id = get_or_create_session_id(&mut jar);
    println!("Session id: {session_id}");

    recorder.record(&mut jar, "page_view", None, &args.page).await;
    recorder
        .record(
            &mut jar,
            "module_view",
            Some("ai-foundations:introduction"),
            &args.page,
        )
        .await;

    println!("Recorded events for session {session_id}");
}

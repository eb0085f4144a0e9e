use gym_log_lib::error::ErrorResponse;

#[tokio::main]
async fn main() {
  let period = std::env::args().nth(1);

  if let Err(e) = gym_log_lib::run(period.as_deref()).await {
    tracing::error!(code = e.code(), "{}", e);
    let response = ErrorResponse::from(&e);
    eprintln!("{}: {}", response.error, response.details);
    std::process::exit(1);
  }
}

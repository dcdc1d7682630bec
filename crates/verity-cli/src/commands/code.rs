use verity_core::generate_completion_code;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", generate_completion_code());
    Ok(())
}

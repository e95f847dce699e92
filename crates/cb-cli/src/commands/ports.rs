use cb_devices::serial::available_ports;

pub fn run() -> Result<(), String> {
    let ports = available_ports().map_err(|e| e.to_string())?;

    if ports.is_empty() {
        println!("  No serial ports found.");
        return Ok(());
    }

    for port in &ports {
        println!("  {}", port.display());
    }
    Ok(())
}

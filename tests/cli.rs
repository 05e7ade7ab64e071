use std::process::{Command, Output};

fn barbershop(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_barbero-semaforos"))
        .args(args)
        .env("BARBERO_UNIDAD_MS", "1")
        .output()
        .expect("no se pudo ejecutar el binario")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_three_clients_are_served_and_exit_ok() {
    let output = barbershop(&["3", "1", "42"]);
    assert!(output.status.success());

    let log = stdout(&output);
    assert_eq!(log.matches("Se va de la barberia").count(), 3);
    assert_eq!(log.matches("Cortando pelo").count(), 3);
    assert_eq!(log.matches("Se vuelve a casa").count(), 1);
}

#[test]
fn test_too_many_clients_fails_without_running() {
    let output = barbershop(&["30", "1", "42"]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("[Cliente"));
}

#[test]
fn test_zero_chairs_fails() {
    let output = barbershop(&["3", "0", "42"]);
    assert!(!output.status.success());
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let output = barbershop(&["3", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Uso:"));
}

#[test]
fn test_invalid_log_level_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_barbero-semaforos"))
        .args(["1", "1", "1"])
        .env("BARBERO_LOG", "ruidoso")
        .output()
        .expect("no se pudo ejecutar el binario");
    assert!(!output.status.success());
}

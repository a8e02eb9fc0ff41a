use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mbpoll"))
}

/// Answer one Read Holding Registers request from `registers`, echoing the
/// transaction and unit ids. Returns the listening port.
fn spawn_device(registers: Vec<u16>) -> (u16, JoinHandle<[u8; 12]>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = [0u8; 12];
        stream.read_exact(&mut request).expect("read request");
        let offset = usize::from(u16::from_be_bytes([request[8], request[9]]));
        let count = usize::from(u16::from_be_bytes([request[10], request[11]]));

        let mut frame = vec![request[0], request[1], 0x00, 0x00];
        frame.extend_from_slice(&((3 + count * 2) as u16).to_be_bytes());
        frame.extend_from_slice(&[request[6], 0x03, (count * 2) as u8]);
        for word in &registers[offset..offset + count] {
            frame.extend_from_slice(&word.to_be_bytes());
        }
        stream.write_all(&frame).expect("write response");
        request
    });
    (port, handle)
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr").port()
}

#[test]
fn help_lists_formats_and_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            contains("Formats:")
                .and(contains("f - float (32 bits)"))
                .and(contains("--port"))
                .and(contains("--slave"))
                .and(contains("--timeout")),
        );
    cmd().arg("-h").assert().success();
}

#[test]
fn version_is_reported() {
    cmd().arg("--version").assert().success().stdout(contains("mbpoll"));
}

#[test]
fn missing_arguments_fail() {
    cmd().arg("127.0.0.1").assert().failure();
}

#[test]
fn polls_unsigned_shorts_with_header() {
    let (port, device) = spawn_device(vec![7, 65535, 42]);

    cmd()
        .arg("-p")
        .arg(port.to_string())
        .arg("127.0.0.1")
        .arg("40001,3,u")
        .assert()
        .success()
        .stdout(
            contains("IP Address: 127.0.0.1")
                .and(contains(format!("Port: {port}")))
                .and(contains("Slave RTU: 1"))
                .and(contains("Registers: 40001-40003"))
                .and(contains("40001:\t7\n40002:\t65535\n40003:\t42\n")),
        );

    let request = device.join().expect("device thread");
    assert_eq!(request[6], 1);
    assert_eq!(&request[8..12], &[0x00, 0x00, 0x00, 0x03]);
}

#[test]
fn slave_flag_sets_unit_id() {
    let (port, device) = spawn_device(vec![0; 4]);

    cmd()
        .args(["-s", "17", "-t", "2", "-q", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,s"])
        .assert()
        .success()
        .stdout(contains("IP Address").not());

    let request = device.join().expect("device thread");
    assert_eq!(request[6], 17);
}

#[test]
fn float_with_end_address_form() {
    let (port, _device) = spawn_device(vec![0, 0, 0x447A, 0x0000]);

    cmd()
        .args(["-q", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40003,40004,f"])
        .assert()
        .success()
        .stdout("40003:\t1000.00\n");
}

#[test]
fn low_first_word_order_swaps_registers() {
    let (port, _device) = spawn_device(vec![0x0000, 0x447A]);

    cmd()
        .args(["-q", "-w", "low-first", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,f"])
        .assert()
        .success()
        .stdout("40001:\t1000.00\n");
}

#[test]
fn bits_and_ascii_rendering() {
    let (port, _device) = spawn_device(vec![0b1010_0000_0000_0001]);
    cmd()
        .args(["-q", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,b"])
        .assert()
        .success()
        .stdout("40001:\t10100000 00000001\n");

    let (port, _device) = spawn_device(vec![0x4101]);
    cmd()
        .args(["-q", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,a"])
        .assert()
        .success()
        .stdout("40001:\tA?\n");
}

#[test]
fn json_outputs_report() {
    let (port, _device) = spawn_device(vec![0xFFFF, 0xFFFF]);

    let assert = cmd()
        .args(["--json", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,2,S"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["plan"]["format"], "signed_long");
    assert_eq!(report["registers"][0]["text"], "-1");
    assert_eq!(report["registers"][0]["address"], 40001);
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");
    let (port, _device) = spawn_device(vec![5]);

    cmd()
        .args(["-q", "--pretty", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,u", "-o"])
        .arg(&report)
        .assert()
        .success()
        .stdout("40001:\t5\n");

    let json = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["registers"][0]["value"]["value"], 5);
}

#[test]
fn unwritable_report_is_an_output_error() {
    let temp = TempDir::new().expect("tempdir");
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write blocker");
    let (port, _device) = spawn_device(vec![5]);

    cmd()
        .args(["-q", "-p"])
        .arg(port.to_string())
        .args(["127.0.0.1", "40001,1,u", "-o"])
        .arg(blocker.join("report.json"))
        .assert()
        .code(3)
        .stderr(contains("error: Failed to create output directory"));
}

#[test]
fn invalid_format_is_a_validation_error() {
    cmd()
        .args(["127.0.0.1", "40001,10,x"])
        .assert()
        .code(2)
        .stderr(contains("error: invalid format type").and(contains("hint:")));
}

#[test]
fn range_errors_are_validation_errors() {
    cmd()
        .args(["127.0.0.1", "49999,2,u"])
        .assert()
        .code(2)
        .stderr(contains("register high limit exceeded"));
    cmd()
        .args(["127.0.0.1", "39999,1,u"])
        .assert()
        .code(2)
        .stderr(contains("invalid starting register"));
    cmd()
        .args(["127.0.0.1", "40001,125,f"])
        .assert()
        .code(2)
        .stderr(contains("invalid number of registers 126"));
}

#[test]
fn malformed_spec_is_a_validation_error() {
    cmd()
        .args(["127.0.0.1", "40001,10"])
        .assert()
        .code(2)
        .stderr(contains("malformed register spec"));
}

#[test]
fn invalid_ip_is_a_validation_error() {
    cmd()
        .args(["300.1.1.1", "40001,1,u"])
        .assert()
        .code(2)
        .stderr(contains("invalid IP address"));
}

#[test]
fn register_40000_is_rejected_before_connecting() {
    cmd()
        .args(["-p"])
        .arg(closed_port().to_string())
        .args(["127.0.0.1", "40000,1,u"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(contains("no wire offset"));
}

#[test]
fn connection_failure_is_a_transport_error() {
    cmd()
        .args(["-q", "-p"])
        .arg(closed_port().to_string())
        .args(["127.0.0.1", "40001,1,u"])
        .assert()
        .code(1)
        .stderr(contains("error: read failed").and(contains("connection to")));
}

#[test]
fn zero_port_is_rejected_by_argument_parsing() {
    cmd()
        .args(["-p", "0", "127.0.0.1", "40001,1,u"])
        .assert()
        .failure();
}

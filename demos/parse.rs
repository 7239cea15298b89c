extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
#[macro_use]
extern crate trackable;
extern crate tsframe;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use clap::{App, Arg, ArgMatches};
use tsframe::ts::{self, ContinuityChecker, TsHeader, TsPacketWriter, WriteTsPacket};
use tsframe::{Error, Result};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("parse")
        .arg(
            Arg::with_name("INPUT")
                .help("MPEG2-TS file to parse")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT_TYPE")
                .long("output-type")
                .short("o")
                .takes_value(true)
                .possible_values(&["header", "pid", "summary", "ts"])
                .default_value("header"),
        )
        .arg(
            Arg::with_name("CHECK_CONTINUITY")
                .long("check-continuity")
                .short("c")
                .help("Reports duplicate and missing packets per PID"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = matches.value_of("INPUT").unwrap();
    let file = track!(File::open(path).map_err(Error::from), "path={}", path)?;

    let mut checker = if matches.is_present("CHECK_CONTINUITY") {
        Some(ContinuityChecker::new())
    } else {
        None
    };
    let mut writer = TsPacketWriter::new(std::io::stdout());
    let mut seen: Vec<u16> = Vec::new();
    let mut counts: BTreeMap<u16, u64> = BTreeMap::new();
    let mut total = 0u64;

    let output_type = matches.value_of("OUTPUT_TYPE").unwrap();
    for packet in ts::parse(BufReader::new(file)) {
        let packet = track!(packet)?;
        if let Some(checker) = checker.as_mut() {
            checker.check(&packet.header);
        }

        let pid = packet.header.pid.as_u16();
        total += 1;
        *counts.entry(pid).or_insert(0) += 1;
        match output_type {
            "header" => log_header(&packet.header),
            "pid" => {
                if !seen.contains(&pid) {
                    seen.push(pid);
                    println!("{:#X}", pid);
                }
            }
            "ts" => track!(writer.write_ts_packet(&packet))?,
            _ => {}
        }
    }

    if output_type == "summary" {
        println!("packets: {}", total);
        for (pid, count) in &counts {
            println!("  PID {:#06X}: {}", pid, count);
        }
        if let Some(checker) = checker.as_ref() {
            println!("duplicates: {}", checker.duplicate_count());
            println!("discontinuities: {}", checker.discontinuity_count());
        }
    }
    Ok(())
}

fn log_header(header: &TsHeader) {
    info!("Detected Transport Stream Packet");
    info!("Header: {:#X}", header.to_u32());
    info!(
        "Transport Error Indicator: {:#X}",
        header.transport_error_indicator as u8
    );
    info!("PID: {:#X}", header.pid.as_u16());
    info!(
        "Payload Unit Start Indicator: {:#X}",
        header.payload_unit_start_indicator as u8
    );
    info!(
        "Transport Scrambling Control: {:#X}",
        header.transport_scrambling_control.as_u8()
    );
    info!(
        "Adaptation Field Control: {:#X}",
        header.adaptation_field_control.as_u8()
    );
    info!(
        "Continuity Counter: {:#X}",
        header.continuity_counter.as_u8()
    );
}

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use lcx6x_driver::Device;
use lcx6x_driver::status::Link;
use nmea::Kind;
use quectel::NmeaSubId;

const RMC_GB: &[u8] =
    b"$GBRMC,055525.000,A,3044.368753,N,10357.548051,E,0.00,000.00,100625,,,A,C*13\r\n";
const RMC_GN: &[u8] =
    b"$GNRMC,055526.000,A,3044.368800,N,10357.548100,E,1.50,090.00,100625,,,A,V*08\r\n";
const GGA: &[u8] =
    b"$GBGGA,055525.000,3044.368753,N,10357.548051,E,1,08,2.40,129.3,M,-32.3,M,,*56\r\n";

/// Hands out queued chunks, then times out like an idle serial port.
#[derive(Clone, Default)]
struct Script(Arc<Mutex<VecDeque<Vec<u8>>>>);

impl Script {
    fn push(&self, chunk: &[u8]) {
        self.0.lock().unwrap().push_back(chunk.to_vec());
    }
}

impl Read for Script {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.0.lock().unwrap().pop_front();
        match chunk {
            Some(mut chunk) => {
                let len = chunk.len().min(buf.len());
                buf[..len].copy_from_slice(&chunk[..len]);
                if len < chunk.len() {
                    self.0.lock().unwrap().push_front(chunk.split_off(len));
                }
                Ok(len)
            }
            None => {
                thread::sleep(Duration::from_millis(2));
                Err(io::ErrorKind::TimedOut.into())
            }
        }
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<u8>>>);

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn wait_for(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn sentences_reach_the_store() {
    let script = Script::default();
    let device = Device::spawn(script.clone(), Recorder::default()).unwrap();
    assert_eq!(device.status().link, Link::Disconnected);

    let mut bytes = b"\x00garbage".to_vec();
    bytes.extend_from_slice(RMC_GB);
    bytes.extend_from_slice(GGA);
    let (a, b) = bytes.split_at(40);
    script.push(a);
    script.push(b);

    wait_for(|| device.latest(Kind::Gga).is_some());
    let rmc = device.latest(Kind::Rmc).unwrap();
    assert_eq!(rmc.talker, ('G', 'B'));

    let status = device.status();
    assert_eq!(status.link, Link::Active);
    assert_eq!(status.satellites, Some(8));
    assert_eq!(status.altitude, Some(129.3));

    device.stop().unwrap();
}

#[test]
fn rate_commands() {
    let script = Script::default();
    let recorder = Recorder::default();
    let mut device = Device::spawn(script.clone(), recorder.clone()).unwrap();

    device
        .set_output_rates(&[(NmeaSubId::Rmc, 1), (NmeaSubId::Gga, 0)])
        .unwrap();
    assert_eq!(
        *recorder.0.lock().unwrap(),
        [
            0xf1, 0xd9, 0x06, 0x01, 0x03, 0x00, 0xf0, 0x05, 0x01, 0x00, 0x1a, // RMC 1
            0xf1, 0xd9, 0x06, 0x01, 0x03, 0x00, 0xf0, 0x00, 0x00, 0xfa, 0x0f, // GGA 0
        ]
    );
    recorder.0.lock().unwrap().clear();

    // The receiver answers with the same layout as the set command.
    script.push(&[
        0xf1, 0xd9, 0x06, 0x01, 0x03, 0x00, 0xf0, 0x05, 0x01, 0x00, 0x1a,
    ]);
    let rate = device
        .poll_output_rate(NmeaSubId::Rmc, Duration::from_millis(200))
        .unwrap();
    assert_eq!(rate, Some(1));
    assert_eq!(
        *recorder.0.lock().unwrap(),
        [0xf1, 0xd9, 0x06, 0x01, 0x02, 0x00, 0xf0, 0x05, 0xfe, 0x16]
    );
    assert_eq!(device.output_rate(NmeaSubId::Gga), None);

    device.stop().unwrap();
}

#[test]
fn readers_never_see_a_torn_record() {
    let script = Script::default();
    let device = Device::spawn(script.clone(), Recorder::default()).unwrap();
    let store = device.store();

    let reader = thread::spawn(move || {
        let mut seen = 0;
        while seen < 200 {
            if let Some(rmc) = store.latest(Kind::Rmc) {
                let expected = match rmc.talker {
                    ('G', 'B') => nmea::parse(&RMC_GB[..RMC_GB.len() - 2]).unwrap(),
                    _ => nmea::parse(&RMC_GN[..RMC_GN.len() - 2]).unwrap(),
                };
                assert_eq!(rmc, expected);
                seen += 1;
            }
            thread::yield_now();
        }
    });

    for i in 0..200 {
        script.push(if i % 2 == 0 { RMC_GB } else { RMC_GN });
    }
    reader.join().unwrap();
    device.stop().unwrap();
}

#[test]
fn stop_joins_the_reader() {
    let device = Device::spawn(Script::default(), Recorder::default()).unwrap();
    assert!(device.is_running());
    device.stop().unwrap();
}

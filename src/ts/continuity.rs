use std::collections::HashMap;

use ts::{ContinuityCounter, Pid, TsHeader};

/// Result of checking the continuity counter of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuityStatus {
    /// First packet seen for this PID.
    Initial,

    /// The counter has the expected value.
    Ok,

    /// The packet repeats the counter of the previous packet carrying a payload.
    Duplicate,

    /// The counter jumped; packets were lost or reordered.
    #[allow(missing_docs)]
    Discontinuity {
        expected: ContinuityCounter,
        actual: ContinuityCounter,
    },
}

/// Per-PID continuity counter tracking.
///
/// A stage layered after the packet reader: it only inspects headers and never
/// changes the packet sequence.
#[derive(Debug, Default)]
pub struct ContinuityChecker {
    last: HashMap<Pid, ContinuityCounter>,
    duplicate_count: usize,
    discontinuity_count: usize,
}
impl ContinuityChecker {
    /// Makes a new `ContinuityChecker` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of duplicate packets seen so far.
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_count
    }

    /// Number of discontinuities seen so far.
    pub fn discontinuity_count(&self) -> usize {
        self.discontinuity_count
    }

    /// Checks the continuity counter of `header` against the previous packet of the same PID.
    pub fn check(&mut self, header: &TsHeader) -> ContinuityStatus {
        let pid = header.pid;
        if pid.is_null() {
            return ContinuityStatus::Ok;
        }

        let actual = header.continuity_counter;
        let last = match self.last.get(&pid) {
            Some(&last) => last,
            None => {
                self.last.insert(pid, actual);
                return ContinuityStatus::Initial;
            }
        };

        // The counter only advances on packets that carry a payload.
        let status = if header.adaptation_field_control.has_payload() {
            let expected = last.next();
            if actual == expected {
                ContinuityStatus::Ok
            } else if actual == last {
                ContinuityStatus::Duplicate
            } else {
                ContinuityStatus::Discontinuity { expected, actual }
            }
        } else if actual == last {
            ContinuityStatus::Ok
        } else {
            ContinuityStatus::Discontinuity {
                expected: last,
                actual,
            }
        };

        match status {
            ContinuityStatus::Ok => {
                self.last.insert(pid, actual);
            }
            ContinuityStatus::Duplicate => {
                self.duplicate_count += 1;
                log::warn!(
                    "Duplicate packet: pid={:#X}, cc={}",
                    pid.as_u16(),
                    actual.as_u8()
                );
            }
            ContinuityStatus::Discontinuity { expected, .. } => {
                self.discontinuity_count += 1;
                self.last.insert(pid, actual);
                log::warn!(
                    "Continuity counter discontinuity: pid={:#X}, expected={}, actual={}",
                    pid.as_u16(),
                    expected.as_u8(),
                    actual.as_u8()
                );
            }
            ContinuityStatus::Initial => {}
        }
        status
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn header(pid: u16, afc: u32, cc: u32) -> TsHeader {
        TsHeader::from_u32((0x47 << 24) | (u32::from(pid) << 8) | (afc << 4) | cc).unwrap()
    }

    fn cc(n: u8) -> ContinuityCounter {
        ContinuityCounter::new(n).unwrap()
    }

    #[test]
    fn counts_wrap_around() {
        let mut checker = ContinuityChecker::new();
        assert_eq!(checker.check(&header(0x100, 1, 14)), ContinuityStatus::Initial);
        assert_eq!(checker.check(&header(0x100, 1, 15)), ContinuityStatus::Ok);
        assert_eq!(checker.check(&header(0x100, 1, 0)), ContinuityStatus::Ok);
        assert_eq!(checker.discontinuity_count(), 0);
    }

    #[test]
    fn detects_duplicates_and_gaps() {
        let mut checker = ContinuityChecker::new();
        checker.check(&header(0x100, 1, 3));
        assert_eq!(checker.check(&header(0x100, 1, 3)), ContinuityStatus::Duplicate);
        assert_eq!(checker.check(&header(0x100, 1, 4)), ContinuityStatus::Ok);
        assert_eq!(
            checker.check(&header(0x100, 3, 7)),
            ContinuityStatus::Discontinuity {
                expected: cc(5),
                actual: cc(7),
            }
        );
        assert_eq!(checker.check(&header(0x100, 1, 8)), ContinuityStatus::Ok);
        assert_eq!(checker.duplicate_count(), 1);
        assert_eq!(checker.discontinuity_count(), 1);
    }

    #[test]
    fn adaptation_only_packets_keep_the_counter() {
        let mut checker = ContinuityChecker::new();
        checker.check(&header(0x100, 1, 9));
        assert_eq!(checker.check(&header(0x100, 2, 9)), ContinuityStatus::Ok);
        assert_eq!(
            checker.check(&header(0x100, 2, 10)),
            ContinuityStatus::Discontinuity {
                expected: cc(9),
                actual: cc(10),
            }
        );
    }

    #[test]
    fn pids_are_tracked_independently_and_null_packets_ignored() {
        let mut checker = ContinuityChecker::new();
        checker.check(&header(0x100, 1, 0));
        assert_eq!(checker.check(&header(0x101, 1, 7)), ContinuityStatus::Initial);
        assert_eq!(checker.check(&header(0x100, 1, 1)), ContinuityStatus::Ok);
        assert_eq!(checker.check(&header(Pid::NULL, 1, 0)), ContinuityStatus::Ok);
        assert_eq!(checker.check(&header(Pid::NULL, 1, 0)), ContinuityStatus::Ok);
        assert_eq!(checker.duplicate_count(), 0);
    }
}

//! End-to-end scans against listeners on the loopback interface.

mod scan;

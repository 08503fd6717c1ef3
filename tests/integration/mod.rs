//! Integration tests driving the spice-archive binary against temporary archives

mod helpers;

mod test_doctor;
mod test_kernels;
mod test_match;
mod test_release;
mod test_run;

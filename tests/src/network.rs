mod interfaces;
mod util;

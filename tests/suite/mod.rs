mod binary;
mod layout;
mod session;

mod auth;
mod gate;
mod helpers;
mod mocks;
mod shopping;

//! Application layer
//! 레지스트리/디스패처를 정의하고 포트(추상 인터페이스)를 통해 입출력을 사용한다.

pub mod config;
pub mod manager;
pub mod ports;
pub mod registry;

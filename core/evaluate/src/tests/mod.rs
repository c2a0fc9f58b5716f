//! ユースケースと Runner のテスト（Stub アダプタで組み立て、ネットワークは使わない）

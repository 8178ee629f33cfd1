//! 集成测试：存储作用域与并发访问
//!
//! 覆盖三种生命周期策略的差异以及同一作用域上并发操作的串行化。

use std::sync::Arc;
use std::thread;

use hashlock::store::{CredentialStore, EphemeralStore, SessionStore, generate_scope_id};
use hashlock::{CredentialManager, Error, ManagerConfig, StorageScope};

const STRONG: &str = "Tr0ub4dor&9";

fn fast_config() -> ManagerConfig {
    // 使用低 cost 加快测试
    ManagerConfig::new().with_bcrypt_cost(4)
}

/// 进程级作用域：克隆句柄共享同一槽位，凭证跨句柄可见
#[test]
fn test_ephemeral_scope_shared_process_wide() {
    let store = EphemeralStore::new();
    let manager = CredentialManager::with_store(Arc::new(store.clone()), fast_config()).unwrap();

    manager.register(STRONG).unwrap();

    // 同一进程内的另一个句柄看到同一个凭证
    assert!(store.is_set().unwrap());
    let credential = store.get().unwrap().unwrap();
    assert!(hashlock::verify_password(STRONG, &credential));

    // 显式 clear 之前值一直存在
    assert!(store.get().unwrap().is_some());
    manager.clear().unwrap();
    assert!(!store.is_set().unwrap());
}

/// 会话作用域相互隔离；一个会话锁定不影响另一个
#[test]
fn test_session_scopes_isolated() {
    let sessions = SessionStore::new();
    let alice = CredentialManager::for_session(&sessions, "sess-alice", fast_config()).unwrap();
    let bob = CredentialManager::for_session(&sessions, "sess-bob", fast_config()).unwrap();

    alice.register(STRONG).unwrap();
    bob.register("CorrectHorse#42").unwrap();

    // 各自的密码互不相通
    assert!(alice.verify(STRONG).is_ok());
    assert!(matches!(
        bob.verify(STRONG),
        Err(Error::Mismatch { .. })
    ));

    // 锁定 bob 不影响 alice
    for _ in 0..bob.max_attempts() {
        let _ = bob.verify("wrong");
    }
    assert!(bob.is_locked().unwrap());
    assert!(alice.verify(STRONG).is_ok());
}

/// 会话失效清除对应作用域的凭证
#[test]
fn test_session_invalidation() {
    let sessions = SessionStore::new();
    let scope_id = generate_scope_id().unwrap();
    let manager = CredentialManager::for_session(&sessions, scope_id.clone(), fast_config()).unwrap();

    manager.register(STRONG).unwrap();
    assert_eq!(sessions.len().unwrap(), 1);

    assert!(sessions.invalidate(&scope_id).unwrap());
    assert!(matches!(manager.verify(STRONG), Err(Error::NoCredential)));
    assert!(sessions.is_empty().unwrap());
}

/// 单次使用作用域：首次验证读取后即清空，必须重新注册
#[test]
fn test_transient_scope_cleared_after_first_use() {
    let config = fast_config().with_storage_scope(StorageScope::Transient);
    let manager = CredentialManager::new(config).unwrap();

    manager.register(STRONG).unwrap();
    assert!(manager.has_credential().unwrap());

    // 披露也是一次消耗性读取
    let credential = manager.reveal_hash(STRONG).unwrap();
    assert!(hashlock::verify_password(STRONG, &credential));

    assert!(!manager.has_credential().unwrap());
    assert!(matches!(manager.verify(STRONG), Err(Error::NoCredential)));

    // 重新注册后又可使用一次
    manager.register(STRONG).unwrap();
    manager.verify(STRONG).unwrap();
}

/// 同一作用域上的并发验证被串行化：失败与锁定的总数精确可数
#[test]
fn test_concurrent_verify_serialized() {
    let manager = Arc::new(CredentialManager::new(fast_config().with_max_attempts(3)).unwrap());
    manager.register(STRONG).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.verify("wrong"))
        })
        .collect();

    let mut mismatches = 0;
    let mut locked_out = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Err(Error::Mismatch { .. }) => mismatches += 1,
            Err(Error::LockedOut) => locked_out += 1,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    // 恰好 max_attempts 次失败消耗计数，其余全部被锁定拒绝
    assert_eq!(mismatches, 3);
    assert_eq!(locked_out, 3);
    assert!(manager.is_locked().unwrap());
}

/// 并发注册与验证不会观察到另一个操作更新到一半的状态
#[test]
fn test_concurrent_register_and_verify() {
    let manager = Arc::new(CredentialManager::new(fast_config()).unwrap());
    manager.register(STRONG).unwrap();

    let writer = {
        let manager = Arc::clone(&manager);
        thread::spawn(move || {
            for _ in 0..5 {
                manager.register(STRONG).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..3)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for _ in 0..5 {
                    // 注册不断复位守卫，结果只能是成功或消耗一次尝试
                    match manager.verify(STRONG) {
                        Ok(()) => {}
                        Err(Error::Mismatch { .. }) | Err(Error::LockedOut) => {
                            panic!("correct password must verify against current credential")
                        }
                        Err(other) => panic!("unexpected error: {:?}", other),
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert!(manager.verify(STRONG).is_ok());
}

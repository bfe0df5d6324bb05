//! Lua scripts for the Valkey cache store.

// Lua script to remove every key matching a pattern
// Walks the keyspace with SCAN so the sweep never blocks the server,
// deleting each page as it goes
//
// ARGV[1]: match pattern (a key prefix followed by '*')
//
// Returns: number of keys removed
pub static DELETE_PREFIX_SCRIPT: &str = r#"
local cursor = '0'
local removed = 0

repeat
    local reply = redis.call('SCAN', cursor, 'MATCH', ARGV[1], 'COUNT', 100)
    cursor = reply[1]
    local keys = reply[2]
    if #keys > 0 then
        removed = removed + redis.call('DEL', unpack(keys))
    end
until cursor == '0'

return removed
"#;
